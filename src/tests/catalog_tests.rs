#![warn(clippy::all, clippy::pedantic)]

#[cfg(test)]
mod tests {
    use crate::catalog::PieceCatalog;
    use crate::components::{PieceColor, PieceShape};
    use crate::tests::test_utils::{SEED, monomino};

    #[test]
    fn test_standard_catalog_contents() {
        let catalog = PieceCatalog::standard();
        assert_eq!(catalog.len(), 17);

        let sizes: Vec<usize> = catalog.templates().iter().map(PieceShape::size).collect();
        assert_eq!(*sizes.iter().min().unwrap(), 1);
        assert_eq!(*sizes.iter().max().unwrap(), 9);

        for template in catalog.templates() {
            assert!(template.is_well_formed(), "malformed template: {template:?}");
        }
    }

    #[test]
    fn test_draw_returns_independent_copy() {
        let catalog = PieceCatalog::standard();
        let mut rng = fastrand::Rng::with_seed(SEED);

        let mut first = catalog.draw(&mut rng);
        let original = first.clone();
        first.offsets.push((5, 5));
        first.color = PieceColor::Purple;

        assert!(catalog.templates().contains(&original));
        assert!(!catalog.templates().contains(&first));
    }

    #[test]
    fn test_draw_covers_whole_catalog() {
        let catalog = PieceCatalog::standard();
        let mut rng = fastrand::Rng::with_seed(SEED);

        let mut seen = vec![false; catalog.len()];
        for _ in 0..2000 {
            let piece = catalog.draw(&mut rng);
            let index = catalog
                .templates()
                .iter()
                .position(|t| *t == piece)
                .expect("drawn piece comes from the catalog");
            seen[index] = true;
        }

        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn test_same_seed_same_draws() {
        let catalog = PieceCatalog::standard();
        let mut a = fastrand::Rng::with_seed(7);
        let mut b = fastrand::Rng::with_seed(7);

        for _ in 0..20 {
            assert_eq!(catalog.draw(&mut a), catalog.draw(&mut b));
        }
    }

    #[test]
    fn test_custom_catalog_rejects_empty() {
        assert!(PieceCatalog::new(Vec::new()).is_none());
        assert!(PieceCatalog::new(vec![PieceShape::new(&[], PieceColor::Pink)]).is_none());
        assert_eq!(PieceCatalog::new(vec![monomino()]).map(|c| c.len()), Some(1));
    }

    #[test]
    fn test_custom_catalog_rejects_repeated_offsets() {
        let repeated = PieceShape::new(&[(0, 0), (0, 0)], PieceColor::Pink);
        assert!(!repeated.is_well_formed());
        assert!(PieceCatalog::new(vec![monomino(), repeated]).is_none());
    }

    #[test]
    fn test_custom_catalog_rejects_negative_offsets() {
        let reaching_up = PieceShape::new(&[(0, 0), (-1, 0)], PieceColor::Purple);
        let reaching_left = PieceShape::new(&[(0, 0), (0, -1)], PieceColor::Purple);

        assert!(PieceCatalog::new(vec![reaching_up]).is_none());
        assert!(PieceCatalog::new(vec![reaching_left]).is_none());
    }
}
