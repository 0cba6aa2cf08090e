use actix_web::http::StatusCode;
use actix_web::{post, web, HttpRequest, HttpResponse, Responder};
use log::{error, info};

use super::{session_cookie, session_token};
use crate::errors::{EmptyCatalog, GuessError};
use crate::models::{AppState, ErrorResponse, GuessRequest, GuessResponse, StateResponse};
use crate::services::game::GuessOutcome;

/// Rejections carry the state the client was actually in.
type Submission = Result<Result<GuessOutcome, (GuessError, StateResponse)>, EmptyCatalog>;

/// Stale row is a conflict the client can recover from, a finished game is
/// a failed precondition, the rest are plain bad requests.
fn status_for(err: &GuessError) -> StatusCode {
    match err {
        GuessError::GameComplete => StatusCode::PRECONDITION_FAILED,
        GuessError::RowMismatch { .. } => StatusCode::CONFLICT,
        _ => StatusCode::BAD_REQUEST,
    }
}

#[post("/guess")]
pub async fn submit_guess(
    data: web::Data<AppState>,
    req: HttpRequest,
    body: web::Json<GuessRequest>,
) -> impl Responder {
    let (token, minted) = session_token(&req);

    let submission = data.sessions.with_session(&token, |slot| -> Submission {
        let state = data.game.sync(slot)?;
        Ok(data
            .game
            .submit_guess(state, &body.guess, body.row)
            .map_err(|err| (err, StateResponse::from_state(state))))
    });

    let mut builder = match &submission {
        Ok(Ok(_)) => HttpResponse::Ok(),
        Ok(Err((err, _))) => HttpResponse::build(status_for(err)),
        Err(_) => HttpResponse::InternalServerError(),
    };
    if minted {
        builder.cookie(session_cookie(&token));
    }

    match submission {
        Ok(Ok(outcome)) => builder.json(GuessResponse::from_outcome(&outcome)),
        Ok(Err((err, state))) => {
            info!("Rejected guess ({}): {}", err.kind(), err);
            builder.json(ErrorResponse::rejection(&err, state))
        }
        Err(err) => {
            error!("Cannot bind a game for today: {}", err);
            builder.json(ErrorResponse::unavailable())
        }
    }
}
