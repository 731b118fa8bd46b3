pub mod submission;

use crate::actix_web::{
    error::JsonPayloadError,
    web::{get, post, resource, JsonConfig, ServiceConfig},
    HttpRequest,
};
use crate::core::ports::repository::Manager;
use crate::error::Error;

fn json_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    Error::BadRequest(format!("JSON parse error - {}", err)).into()
}

pub fn routes<M>(cfg: &mut ServiceConfig)
where
    M: Manager + 'static,
{
    cfg.app_data(JsonConfig::default().error_handler(json_error)).service(
        resource(["/submissions", "/submissions/"])
            .route(get().to(submission::list::<M>))
            .route(post().to(submission::create::<M>)),
    );
}
