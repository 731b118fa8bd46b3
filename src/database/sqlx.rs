use crate::core::models::{
    answer::{Insert as AnswerInsert, Linked as LinkedAnswer},
    submission::{Insert as SubmissionInsert, Record as SubmissionRecord},
};
use crate::core::ports::repository::{AnswerCommon, Common, Manager, Store, SubmissionCommon, TxStore};
use crate::error::Error;
use sqlx::pool::PoolConnection;
use sqlx::{query_as, query_scalar, Executor, PgPool, Postgres, QueryBuilder, Transaction};

pub struct PgSqlx<E>
where
    for<'e> &'e mut E: Executor<'e>,
{
    executor: E,
}

impl<E> PgSqlx<E>
where
    for<'e> &'e mut E: Executor<'e>,
{
    pub fn new(executor: E) -> Self {
        Self { executor }
    }
}

impl<E> AnswerCommon for PgSqlx<E>
where
    for<'e> &'e mut E: Executor<'e, Database = Postgres>,
{
    async fn insert(&mut self, answer: AnswerInsert) -> Result<i64, Error> {
        let id = query_scalar("INSERT INTO answers (text, correct) VALUES ($1, $2) RETURNING id")
            .bind(answer.text)
            .bind(answer.correct)
            .fetch_one(&mut self.executor)
            .await?;
        Ok(id)
    }

    async fn query_by_submissions(&mut self, submission_ids: &[i64]) -> Result<Vec<LinkedAnswer>, Error> {
        let answers = query_as(
            "
        SELECT sa.submission_id, a.id, a.text, a.correct
        FROM submissions_answers AS sa
        JOIN answers AS a ON sa.answer_id = a.id
        WHERE sa.submission_id = ANY($1)
        ORDER BY sa.id",
        )
        .bind(submission_ids)
        .fetch_all(&mut self.executor)
        .await?;
        Ok(answers)
    }
}

impl<E> SubmissionCommon for PgSqlx<E>
where
    for<'e> &'e mut E: Executor<'e, Database = Postgres>,
{
    async fn insert(&mut self, submission: SubmissionInsert) -> Result<i64, Error> {
        let id = query_scalar("INSERT INTO submissions (question_text, user_answer, submitted_at) VALUES ($1, $2, $3) RETURNING id")
            .bind(submission.question_text)
            .bind(submission.user_answer)
            .bind(submission.submitted_at)
            .fetch_one(&mut self.executor)
            .await?;
        Ok(id)
    }

    async fn add_answers(&mut self, id: i64, answer_ids: &[i64]) -> Result<(), Error> {
        if answer_ids.is_empty() {
            return Ok(());
        }
        QueryBuilder::<Postgres>::new("INSERT INTO submissions_answers (submission_id, answer_id)")
            .push_values(answer_ids, |mut b, aid| {
                b.push_bind(id);
                b.push_bind(*aid);
            })
            .build()
            .execute(&mut self.executor)
            .await?;
        Ok(())
    }

    async fn query(&mut self) -> Result<Vec<SubmissionRecord>, Error> {
        let submissions = query_as("SELECT id, question_text, user_answer, submitted_at FROM submissions ORDER BY id")
            .fetch_all(&mut self.executor)
            .await?;
        Ok(submissions)
    }
}

impl Store for PgSqlx<PoolConnection<Postgres>> {}
impl Store for PgSqlx<Transaction<'static, Postgres>> {}
impl Common for PgSqlx<PoolConnection<Postgres>> {}
impl Common for PgSqlx<Transaction<'static, Postgres>> {}

impl TxStore for PgSqlx<Transaction<'static, Postgres>> {
    async fn commit(self) -> Result<(), Error> {
        self.executor.commit().await?;
        Ok(())
    }

    async fn rollback(self) -> Result<(), Error> {
        self.executor.rollback().await?;
        Ok(())
    }
}

pub struct PgSqlxManager {
    pool: PgPool,
}

impl PgSqlxManager {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl Manager for PgSqlxManager {
    type Store = PgSqlx<PoolConnection<Postgres>>;
    type TxStore = PgSqlx<Transaction<'static, Postgres>>;

    async fn db(&self) -> Result<Self::Store, Error> {
        let conn = self.pool.acquire().await?;
        Ok(PgSqlx::new(conn))
    }

    async fn tx(&self) -> Result<Self::TxStore, Error> {
        let tx = self.pool.begin().await?;
        Ok(PgSqlx::new(tx))
    }
}
