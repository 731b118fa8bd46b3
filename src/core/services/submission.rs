use crate::core::models::{
    answer::Answer,
    submission::{Insert as SubmissionInsert, Submission, SubmissionCreate, Validated},
};
use crate::core::ports::repository::{AnswerCommon, Manager, Store, SubmissionCommon, TxStore};
use crate::error::Error;
use chrono::{SubsecRound, Utc};
use itertools::Itertools;

/// Validates the payload, then writes the submission, its answers and the
/// links between them in one transaction.
pub async fn create_submission<M>(manager: &M, create: SubmissionCreate) -> Result<Submission, Error>
where
    M: Manager,
{
    let validated = create.validate()?;
    let mut tx = manager.tx().await?;
    match write_submission(&mut tx, validated).await {
        Ok(submission) => {
            tx.commit().await?;
            log::info!("created submission {} with {} answers", submission.id, submission.answers.len());
            Ok(submission)
        }
        Err(e) => {
            if let Err(re) = tx.rollback().await {
                log::warn!("failed to rollback submission create: {}", re);
            }
            Err(e)
        }
    }
}

async fn write_submission<T>(tx: &mut T, validated: Validated) -> Result<Submission, Error>
where
    T: TxStore,
{
    // postgres keeps microseconds, so the response matches later reads
    let submitted_at = Utc::now().trunc_subsecs(6);
    let id = SubmissionCommon::insert(
        tx,
        SubmissionInsert {
            question_text: validated.question_text.clone(),
            user_answer: validated.user_answer.clone(),
            submitted_at,
        },
    )
    .await?;
    let mut answers = Vec::with_capacity(validated.answers.len());
    for a in validated.answers {
        let answer_id = AnswerCommon::insert(tx, a.clone()).await?;
        answers.push(Answer {
            id: answer_id,
            text: a.text,
            correct: a.correct,
        });
    }
    let answer_ids: Vec<i64> = answers.iter().map(|a| a.id).collect();
    SubmissionCommon::add_answers(tx, id, &answer_ids).await?;
    Ok(Submission {
        id,
        question_text: validated.question_text,
        answers,
        user_answer: validated.user_answer,
        submitted_at,
    })
}

pub async fn list_submissions<S>(store: &mut S) -> Result<Vec<Submission>, Error>
where
    S: Store,
{
    let rows = SubmissionCommon::query(store).await?;
    if rows.is_empty() {
        return Ok(Vec::new());
    }
    let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
    let mut answers = AnswerCommon::query_by_submissions(store, &ids)
        .await?
        .into_iter()
        .map(|a| (a.submission_id, Answer::from(a)))
        .into_group_map();
    Ok(rows
        .into_iter()
        .map(|r| {
            let own = answers.remove(&r.id).unwrap_or_default();
            Submission::from_record(r, own)
        })
        .collect())
}
