#![allow(dead_code)]

use diesel::prelude::*;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use pushkind_leads::db::{DbPool, establish_connection_pool};
use pushkind_leads::repository::DieselRepository;
use pushkind_leads::schema::{campaigns, contacts};
use tempfile::TempDir;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("./migrations");

/// Migrated SQLite database living in a temporary directory.
pub struct TestDb {
    _dir: TempDir,
    pool: DbPool,
}

impl TestDb {
    pub fn new(name: &str) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join(name);
        let pool = establish_connection_pool(path.to_str().expect("utf-8 path"))
            .expect("create pool");

        let mut conn = pool.get().expect("get connection");
        conn.run_pending_migrations(MIGRATIONS)
            .expect("run migrations");

        Self { _dir: dir, pool }
    }

    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }

    pub fn repo(&self) -> DieselRepository {
        DieselRepository::new(self.pool())
    }

    pub fn insert_campaign(&self, name: &str) -> i32 {
        let mut conn = self.pool.get().expect("get connection");
        diesel::insert_into(campaigns::table)
            .values(campaigns::name.eq(name))
            .returning(campaigns::id)
            .get_result(&mut conn)
            .expect("insert campaign")
    }

    pub fn insert_contact(&self, email: &str) -> i32 {
        let mut conn = self.pool.get().expect("get connection");
        diesel::insert_into(contacts::table)
            .values((
                contacts::first_name.eq("Ann"),
                contacts::email_address.eq(email),
            ))
            .returning(contacts::id)
            .get_result(&mut conn)
            .expect("insert contact")
    }

    pub fn count(&self, table: &str) -> i64 {
        #[derive(QueryableByName)]
        struct Count {
            #[diesel(sql_type = diesel::sql_types::BigInt)]
            total: i64,
        }

        let mut conn = self.pool.get().expect("get connection");
        diesel::sql_query(format!("SELECT COUNT(*) AS total FROM {table}"))
            .get_result::<Count>(&mut conn)
            .expect("count rows")
            .total
    }
}
