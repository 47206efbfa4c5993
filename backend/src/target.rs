use diesel_async::{AsyncPgConnection, RunQueryDsl};
use ingest::Batch;

/// Somewhere a batch of rows can be written to.
#[async_trait::async_trait]
pub trait BatchTarget: Send {
    /// Inserts every row of `batch` and commits, all or nothing.
    ///
    /// Returns the number of inserted rows.
    async fn insert(&mut self, batch: Batch) -> Result<usize, crate::Error>;
}

/// Postgres limits a single statement to this many bind parameters.
const MAX_BIND_PARAMS: usize = 65_535;

macro_rules! insert_chunked {
    ($conn:expr, $table:expr, $rows:expr, $columns:expr) => {{
        let mut inserted = 0;
        for chunk in $rows.chunks(MAX_BIND_PARAMS / $columns) {
            inserted += diesel::dsl::insert_into($table)
                .values(chunk)
                .execute(&mut *$conn)
                .await?;
        }
        inserted
    }};
}

pub struct PgTarget<'c> {
    connection: &'c mut AsyncPgConnection,
}

impl<'c> PgTarget<'c> {
    pub fn new(connection: &'c mut AsyncPgConnection) -> Self {
        Self { connection }
    }
}

#[async_trait::async_trait]
impl<'c> BatchTarget for PgTarget<'c> {
    async fn insert(&mut self, batch: Batch) -> Result<usize, crate::Error> {
        let entity = batch.entity();
        let columns = entity.columns().len();

        let inserted = self
            .connection
            .build_transaction()
            .run::<_, crate::Error, _>(|conn| {
                Box::pin(async move {
                    let inserted = match batch {
                        Batch::Teams(rows) => {
                            let rows: Vec<crate::models::Team> =
                                rows.into_iter().map(Into::into).collect();
                            insert_chunked!(conn, crate::schema::teams::table, rows, columns)
                        }
                        Batch::Agents(rows) => {
                            let rows: Vec<crate::models::Agent> =
                                rows.into_iter().map(Into::into).collect();
                            insert_chunked!(conn, crate::schema::agents::table, rows, columns)
                        }
                        Batch::Players(rows) => {
                            let rows: Vec<crate::models::Player> =
                                rows.into_iter().map(Into::into).collect();
                            insert_chunked!(conn, crate::schema::players::table, rows, columns)
                        }
                        Batch::Games(rows) => {
                            let rows: Vec<crate::models::Game> =
                                rows.into_iter().map(Into::into).collect();
                            insert_chunked!(conn, crate::schema::games::table, rows, columns)
                        }
                        Batch::Stats(rows) => {
                            let rows: Vec<crate::models::Stat> =
                                rows.into_iter().map(Into::into).collect();
                            insert_chunked!(conn, crate::schema::stats::table, rows, columns)
                        }
                    };

                    // Explicit ids bypass the identity sequence, move it past them.
                    if let Some(id) = entity.id_column() {
                        let table = entity.table();
                        let query = diesel::sql_query(format!(
                            "SELECT setval(pg_get_serial_sequence('{table}', '{id}'), MAX({id})) \
                             FROM {table} HAVING MAX({id}) IS NOT NULL"
                        ));
                        tracing::debug!(?query, "Resync identity");
                        query.execute(&mut *conn).await?;
                    }

                    Ok(inserted)
                })
            })
            .await?;

        Ok(inserted)
    }
}
