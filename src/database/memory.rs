//! In-memory implementation of the repository ports, used by tests.
//!
//! A transaction works on a private copy of the tables and publishes it on
//! commit, so anything not committed is never seen by other stores.

use crate::core::models::{
    answer::{Answer, Insert as AnswerInsert, Linked as LinkedAnswer},
    submission::{Insert as SubmissionInsert, Record as SubmissionRecord},
};
use crate::core::ports::repository::{AnswerCommon, Common, Manager, Store, SubmissionCommon, TxStore};
use crate::error::Error;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug, Clone, Default)]
struct Tables {
    submissions: Vec<SubmissionRecord>,
    answers: Vec<Answer>,
    links: Vec<(i64, i64)>,
    next_submission_id: i64,
    next_answer_id: i64,
}

#[derive(Debug, Default)]
struct Shared {
    tables: Mutex<Tables>,
    fail_answer_insert_at: Mutex<Option<usize>>,
}

/// Commit replaces the shared tables with the transaction's copy, so two
/// overlapping transactions lose the first one's writes. Tests must run their
/// transactions one after another.
#[derive(Debug, Clone, Default)]
pub struct MemoryManager {
    shared: Arc<Shared>,
}

impl MemoryManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the `n`th answer insert (zero based) of the next transaction fail.
    pub fn fail_answer_insert_at(&self, n: usize) {
        *lock(&self.shared.fail_answer_insert_at) = Some(n);
    }

    /// Committed row counts of (submissions, answers, links).
    pub fn counts(&self) -> (usize, usize, usize) {
        let t = lock(&self.shared.tables);
        (t.submissions.len(), t.answers.len(), t.links.len())
    }
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|e| e.into_inner())
}

pub struct MemoryStore {
    shared: Arc<Shared>,
    working: Option<Tables>,
    fail_answer_insert_at: Option<usize>,
    answer_inserts: usize,
}

impl MemoryStore {
    fn with_tables<R>(&mut self, f: impl FnOnce(&mut Tables) -> R) -> R {
        match self.working.as_mut() {
            Some(t) => f(t),
            None => f(&mut lock(&self.shared.tables)),
        }
    }
}

impl AnswerCommon for MemoryStore {
    async fn insert(&mut self, answer: AnswerInsert) -> Result<i64, Error> {
        let n = self.answer_inserts;
        self.answer_inserts += 1;
        if self.fail_answer_insert_at == Some(n) {
            return Err(Error::DatabaseError(sqlx::Error::PoolClosed));
        }
        Ok(self.with_tables(|t| {
            t.next_answer_id += 1;
            t.answers.push(Answer {
                id: t.next_answer_id,
                text: answer.text,
                correct: answer.correct,
            });
            t.next_answer_id
        }))
    }

    async fn query_by_submissions(&mut self, submission_ids: &[i64]) -> Result<Vec<LinkedAnswer>, Error> {
        Ok(self.with_tables(|t| {
            t.links
                .iter()
                .filter(|(sid, _)| submission_ids.contains(sid))
                .filter_map(|&(sid, aid)| {
                    t.answers.iter().find(|a| a.id == aid).map(|a| LinkedAnswer {
                        submission_id: sid,
                        id: a.id,
                        text: a.text.clone(),
                        correct: a.correct,
                    })
                })
                .collect()
        }))
    }
}

impl SubmissionCommon for MemoryStore {
    async fn insert(&mut self, submission: SubmissionInsert) -> Result<i64, Error> {
        Ok(self.with_tables(|t| {
            t.next_submission_id += 1;
            t.submissions.push(SubmissionRecord {
                id: t.next_submission_id,
                question_text: submission.question_text,
                user_answer: submission.user_answer,
                submitted_at: submission.submitted_at,
            });
            t.next_submission_id
        }))
    }

    async fn add_answers(&mut self, id: i64, answer_ids: &[i64]) -> Result<(), Error> {
        self.with_tables(|t| t.links.extend(answer_ids.iter().map(|&aid| (id, aid))));
        Ok(())
    }

    async fn query(&mut self) -> Result<Vec<SubmissionRecord>, Error> {
        Ok(self.with_tables(|t| t.submissions.clone()))
    }
}

impl Common for MemoryStore {}
impl Store for MemoryStore {}

impl TxStore for MemoryStore {
    async fn commit(mut self) -> Result<(), Error> {
        if let Some(t) = self.working.take() {
            *lock(&self.shared.tables) = t;
        }
        Ok(())
    }

    async fn rollback(self) -> Result<(), Error> {
        Ok(())
    }
}

impl Manager for MemoryManager {
    type Store = MemoryStore;
    type TxStore = MemoryStore;

    async fn db(&self) -> Result<MemoryStore, Error> {
        Ok(MemoryStore {
            shared: self.shared.clone(),
            working: None,
            fail_answer_insert_at: None,
            answer_inserts: 0,
        })
    }

    async fn tx(&self) -> Result<MemoryStore, Error> {
        let working = lock(&self.shared.tables).clone();
        Ok(MemoryStore {
            shared: self.shared.clone(),
            working: Some(working),
            fail_answer_insert_at: lock(&self.shared.fail_answer_insert_at).take(),
            answer_inserts: 0,
        })
    }
}
