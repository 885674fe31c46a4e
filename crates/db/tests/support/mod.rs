#![allow(dead_code)]

use std::path::PathBuf;

use carbon_db::Db;
use tempfile::TempDir;

pub struct TestDb {
    pub _dir: TempDir,
    pub db: Db,
    pub path: PathBuf,
}

pub fn setup_db() -> TestDb {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("test.sqlite");
    let mut db = Db::open(&path).expect("open db");
    db.migrate().expect("migrate db");
    TestDb {
        _dir: dir,
        db,
        path,
    }
}

pub fn reopen(test_db: &TestDb) -> Db {
    let mut db = Db::open(&test_db.path).expect("reopen db");
    db.migrate().expect("migrate db");
    db
}
