#![warn(clippy::all, clippy::pedantic)]

#[cfg(test)]
mod tests {
    use crate::engine::GameEngine;
    use crate::error::PersistenceError;
    use crate::persistence::{FileHighScoreStore, HighScoreStore, MemoryHighScoreStore};
    use crate::tests::test_utils::{monomino, seeded_rules, single_catalog};
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_loads_zero() {
        let temp_dir = tempdir().expect("Failed to create temp directory");
        let store = FileHighScoreStore::new(temp_dir.path().join("highscore.toml"));

        assert_eq!(store.load_high_score().expect("missing file is fine"), 0);
    }

    #[test]
    fn test_save_and_load_high_score() {
        let temp_dir = tempdir().expect("Failed to create temp directory");
        let path = temp_dir.path().join("nested").join("highscore.toml");
        let mut store = FileHighScoreStore::new(&path);

        store.save_high_score(1234).expect("Failed to save high score");

        assert!(path.exists());
        let reloaded = FileHighScoreStore::new(&path);
        assert_eq!(reloaded.load_high_score().expect("file was written"), 1234);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let temp_dir = tempdir().expect("Failed to create temp directory");
        let path = temp_dir.path().join("highscore.toml");
        fs::write(&path, "high_score = \"lots\"").expect("Failed to write file");

        let store = FileHighScoreStore::new(&path);
        assert!(matches!(
            store.load_high_score(),
            Err(PersistenceError::Parse(_))
        ));
    }

    #[test]
    fn test_configured_path_is_used() {
        let temp_dir = tempdir().expect("Failed to create temp directory");
        let path = temp_dir.path().join("custom.toml");

        let store = FileHighScoreStore::from_config(Some(path.as_path()));
        assert_eq!(store.path(), path.as_path());
    }

    #[test]
    fn test_memory_store_failure_switch() {
        let mut store = MemoryHighScoreStore::failing();
        assert!(store.load_high_score().is_err());
        assert!(store.save_high_score(5).is_err());
        assert_eq!(store.stored(), 0);

        store.fail = false;
        store.save_high_score(5).expect("store is back");
        assert_eq!(store.load_high_score().expect("store is back"), 5);
    }

    #[test]
    fn test_engine_reads_and_writes_file_store() {
        let temp_dir = tempdir().expect("Failed to create temp directory");
        let path = temp_dir.path().join("highscore.toml");
        FileHighScoreStore::new(&path)
            .save_high_score(1)
            .expect("Failed to seed high score");

        let mut engine = GameEngine::with_catalog(
            seeded_rules(),
            single_catalog(monomino()),
            FileHighScoreStore::new(&path),
        )
        .expect("valid rules");
        assert_eq!(engine.high_score(), 1);

        engine.place_piece(0, 0, 0).expect("fits");
        engine.place_piece(1, 0, 1).expect("fits");
        engine.place_piece(2, 0, 2).expect("fits");

        let stored = FileHighScoreStore::new(&path)
            .load_high_score()
            .expect("file was written");
        assert_eq!(stored, 3);
    }
}
