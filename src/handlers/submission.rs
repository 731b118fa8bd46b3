use crate::actix_web::{
    http::StatusCode,
    web::{Data, Json},
    HttpResponse,
};
use crate::core::models::submission::{Submission, SubmissionCreate};
use crate::core::ports::repository::Manager;
use crate::core::services::submission::{create_submission, list_submissions};
use crate::error::Error;

pub async fn list<M>(manager: Data<M>) -> Result<Json<Vec<Submission>>, Error>
where
    M: Manager + 'static,
{
    let mut db = manager.db().await?;
    let submissions = list_submissions(&mut db).await?;
    Ok(Json(submissions))
}

pub async fn create<M>(manager: Data<M>, Json(create): Json<SubmissionCreate>) -> Result<HttpResponse, Error>
where
    M: Manager + 'static,
{
    let submission = create_submission(manager.get_ref(), create).await?;
    Ok(HttpResponse::build(StatusCode::CREATED).json(submission))
}
