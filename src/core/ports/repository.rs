use crate::core::models::{
    answer::{Insert as AnswerInsert, Linked as LinkedAnswer},
    submission::{Insert as SubmissionInsert, Record as SubmissionRecord},
};
use crate::error::Error;

pub trait AnswerCommon {
    async fn insert(&mut self, answer: AnswerInsert) -> Result<i64, Error>;
    /// Answers linked to any of the given submissions, in link order.
    async fn query_by_submissions(&mut self, submission_ids: &[i64]) -> Result<Vec<LinkedAnswer>, Error>;
}

pub trait SubmissionCommon {
    async fn insert(&mut self, submission: SubmissionInsert) -> Result<i64, Error>;
    async fn add_answers(&mut self, id: i64, answer_ids: &[i64]) -> Result<(), Error>;
    /// All submissions in insertion order.
    async fn query(&mut self) -> Result<Vec<SubmissionRecord>, Error>;
}

pub trait Common: AnswerCommon + SubmissionCommon {}

pub trait Store: Common {}

pub trait TxStore: Store {
    async fn commit(self) -> Result<(), Error>;
    async fn rollback(self) -> Result<(), Error>;
}

pub trait Manager {
    type Store: Store + 'static;
    type TxStore: TxStore + 'static;

    async fn db(&self) -> Result<Self::Store, Error>;
    async fn tx(&self) -> Result<Self::TxStore, Error>;
}
