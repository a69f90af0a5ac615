// src/core/indexing/vector/antipole/tests/test_index.rs

#[cfg(test)]
mod index_tests {
    use super::super::{random_vectors, two_pair_vectors};
    use crate::core::common::IndexError;
    use crate::core::config::IndexConfig;
    use crate::core::indexing::vector::antipole::search::linear_scan_closest;
    use crate::core::indexing::vector::antipole::{AntipoleError, AntipoleTreeIndex};
    use crate::core::indexing::vector::VectorIndex;
    use crate::core::vector::{ConversionMethod, Rgb, Thumbnail};

    fn index_with_leaf_size(min_leaf_size: usize) -> AntipoleTreeIndex {
        let config = IndexConfig::builder().min_leaf_size(min_leaf_size).build().unwrap();
        AntipoleTreeIndex::new("test_index", config).unwrap()
    }

    fn gradient_thumbnail(width: u32, height: u32, seed: u8) -> Thumbnail {
        let pixels = (0..width * height)
            .map(|i| {
                let v = (i as u8).wrapping_mul(seed).wrapping_add(seed);
                Rgb::new(v, v.wrapping_add(40), 255 - v)
            })
            .collect();
        Thumbnail::new(width, height, pixels).unwrap()
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = IndexConfig { min_leaf_size: 0, ..IndexConfig::default() };
        let result = AntipoleTreeIndex::new("bad", config);
        assert!(matches!(result, Err(IndexError::Configuration(_))));
    }

    #[test]
    fn test_closest_before_build_is_none() {
        let index = index_with_leaf_size(4);
        assert!(index.is_empty());
        assert_eq!(index.dimension(), 0);
        assert_eq!(index.closest(&[1.0, 2.0]).unwrap(), None);
        assert!(index.stats().is_none());
    }

    #[test]
    fn test_build_and_query() {
        let mut index = index_with_leaf_size(1);
        index.build(two_pair_vectors()).unwrap();

        assert_eq!(index.name(), "test_index");
        assert_eq!(index.len(), 4);
        assert_eq!(index.dimension(), 3);
        assert_eq!(index.closest(&[0.0, 0.0, 0.4]).unwrap(), Some(0));
        assert_eq!(index.closest(&[10.0, 10.0, 9.6]).unwrap(), Some(3));
        assert_eq!(index.vector(2), Some(&[10.0, 10.0, 10.0][..]));
        assert_eq!(index.stats().unwrap().indexed_vectors, 4);
    }

    #[test]
    fn test_build_with_zero_vectors() {
        let mut index = index_with_leaf_size(1);
        index.build(Vec::new()).unwrap();
        assert!(index.tree().unwrap().is_empty());
        assert_eq!(index.closest(&[0.0]).unwrap(), None);
    }

    #[test]
    fn test_single_vector_wins_every_query() {
        let mut index = index_with_leaf_size(100);
        index.build(vec![vec![3.0, 3.0]]).unwrap();
        for probe in random_vectors(20, 2, 61) {
            assert_eq!(index.closest(&probe).unwrap(), Some(0));
        }
    }

    #[test]
    fn test_rebuild_replaces_previous_vectors() {
        let mut index = index_with_leaf_size(2);
        index.build(random_vectors(50, 3, 1)).unwrap();
        index.build(vec![vec![9.0, 9.0, 9.0], vec![0.0, 0.0, 0.0]]).unwrap();

        assert_eq!(index.len(), 2);
        assert_eq!(index.closest(&[8.0, 8.0, 8.0]).unwrap(), Some(0));
    }

    #[test]
    fn test_failed_build_leaves_index_empty() {
        let mut index = index_with_leaf_size(2);
        index.build(random_vectors(10, 3, 2)).unwrap();

        let result = index.build(vec![vec![1.0, 2.0, 3.0], vec![1.0]]);
        assert!(matches!(result, Err(IndexError::DimensionMismatch { expected: 3, actual: 1 })));
        assert!(index.is_empty());
        assert_eq!(index.closest(&[1.0, 2.0, 3.0]).unwrap(), None);
    }

    #[test]
    fn test_probe_dimension_mismatch_is_lifted() {
        let mut index = index_with_leaf_size(2);
        index.build(random_vectors(10, 3, 2)).unwrap();
        assert!(matches!(
            index.closest(&[1.0]),
            Err(IndexError::DimensionMismatch { expected: 3, actual: 1 })
        ));
    }

    #[test]
    fn test_non_finite_vectors_rejected() {
        let mut index = index_with_leaf_size(2);
        let result = index.build(vec![vec![1.0, 2.0], vec![f32::NAN, 0.0]]);
        assert!(matches!(result, Err(IndexError::InvalidInput { .. })));
        assert!(index.is_empty());

        index.build(random_vectors(20, 2, 5)).unwrap();
        assert!(matches!(
            index.closest(&[f32::NAN, 0.5]),
            Err(IndexError::Index(AntipoleError::InvalidInput(_)))
        ));
    }

    #[test]
    fn test_batch_matches_single_queries() {
        let mut index = index_with_leaf_size(8);
        index.build(random_vectors(1500, 6, 71)).unwrap();

        let probes = random_vectors(300, 6, 72);
        let batch = index.closest_batch(&probes).unwrap();
        assert_eq!(batch.len(), probes.len());
        for (probe, answer) in probes.iter().zip(batch) {
            assert_eq!(answer, index.closest(probe).unwrap());
            assert_eq!(answer, linear_scan_closest(index.store(), probe).map(|(idx, _)| idx));
        }
    }

    #[test]
    fn test_thumbnails_find_themselves() {
        for method in [ConversionMethod::Rgb, ConversionMethod::Lab, ConversionMethod::Lch] {
            let config = IndexConfig::builder()
                .conversion_method(method)
                .min_leaf_size(2)
                .thumbnail_size(4, 3)
                .build()
                .unwrap();
            let mut index = AntipoleTreeIndex::new("thumbs", config).unwrap();

            let thumbnails: Vec<Thumbnail> =
                (1..=12).map(|seed| gradient_thumbnail(4, 3, seed * 7)).collect();
            index.build_from_thumbnails(&thumbnails).unwrap();
            assert_eq!(index.dimension(), 36);
            assert_eq!(index.conversion_method(), method);

            for (i, thumbnail) in thumbnails.iter().enumerate() {
                let (idx, dist) = index
                    .closest_with_distance(&index.convert(thumbnail).unwrap())
                    .unwrap()
                    .unwrap();
                assert_eq!(dist, 0.0, "thumbnail {} should match itself exactly", i);
                assert_eq!(index.closest_thumbnail(thumbnail).unwrap(), Some(idx));
            }
        }
    }

    #[test]
    fn test_solid_color_probe_finds_nearest_color() {
        let config = IndexConfig::builder()
            .conversion_method(ConversionMethod::Lab)
            .min_leaf_size(1)
            .build()
            .unwrap();
        let mut index = AntipoleTreeIndex::new("colors", config).unwrap();
        let palette = [
            Rgb::new(0, 0, 0),
            Rgb::new(255, 255, 255),
            Rgb::new(255, 0, 0),
            Rgb::new(0, 0, 255),
        ];
        let thumbnails: Vec<Thumbnail> = palette.iter().map(|&c| Thumbnail::filled(2, 2, c)).collect();
        index.build_from_thumbnails(&thumbnails).unwrap();

        let dark_red = Thumbnail::filled(2, 2, Rgb::new(200, 20, 10));
        assert_eq!(index.closest_thumbnail(&dark_red).unwrap(), Some(2));
        let near_white = Thumbnail::filled(2, 2, Rgb::new(240, 240, 245));
        assert_eq!(index.closest_thumbnail(&near_white).unwrap(), Some(1));
    }

    #[test]
    fn test_wrong_thumbnail_size_rejected() {
        let config = IndexConfig::for_mosaic(ConversionMethod::Rgb).unwrap();
        let mut index = AntipoleTreeIndex::new("mosaic", config).unwrap();

        let wrong = Thumbnail::filled(4, 4, Rgb::new(1, 2, 3));
        let result = index.build_from_thumbnails(&[wrong.clone()]);
        assert!(matches!(result, Err(IndexError::InvalidInput { .. })));
        assert!(matches!(index.closest_thumbnail(&wrong), Err(IndexError::InvalidInput { .. })));

        let right = Thumbnail::filled(48, 36, Rgb::new(1, 2, 3));
        index.build_from_thumbnails(&[right.clone()]).unwrap();
        assert_eq!(index.closest_thumbnail(&right).unwrap(), Some(0));
    }
}
