/// Asserts the genealogy of the photon at `index`.
#[macro_export]
macro_rules! assert_genealogy {
    ($processor:expr, $index:expr, $expected:expr) => {
        let photon = &$processor.labeler().photons()[$index];
        assert_eq!(
            photon.genealogy,
            $expected,
            "Photon {} from parent {} has genealogy {:?}",
            $index,
            photon.parent_track_id,
            photon.genealogy
        );
    };
}

/// Asserts the category and sub-ID assigned to a track.
#[macro_export]
macro_rules! assert_category {
    ($processor:expr, $id:expr, $category:expr, $sub_id:expr) => {
        let record = $processor
            .registry()
            .get($id)
            .expect("Track not found in registry");
        assert_eq!(
            (record.category, record.sub_id),
            ($category, $sub_id),
            "Track {} classification mismatch",
            $id
        );
    };
}

/// Asserts that a track is neither categorized nor given a sub-ID.
#[macro_export]
macro_rules! assert_uncategorized {
    ($processor:expr, $id:expr) => {
        $crate::assert_category!(
            $processor,
            $id,
            photonsim_data::Category::Uncategorized,
            -1
        );
    };
}
