use actix_web::{get, web, HttpRequest, HttpResponse, Responder};
use log::error;

use super::{session_cookie, session_token};
use crate::models::{AppState, ErrorResponse, StateResponse};

/// Current board state for the caller's session, creating or rebinding the
/// session as a side effect.
#[get("/game-state")]
pub async fn game_state(data: web::Data<AppState>, req: HttpRequest) -> impl Responder {
    let (token, minted) = session_token(&req);

    let view = data
        .sessions
        .with_session(&token, |slot| data.game.sync(slot).map(|state| StateResponse::from_state(state)));

    match view {
        Ok(view) => {
            let mut builder = HttpResponse::Ok();
            if minted {
                builder.cookie(session_cookie(&token));
            }
            builder.json(view)
        }
        Err(err) => {
            error!("Cannot bind a game for today: {}", err);
            HttpResponse::InternalServerError().json(ErrorResponse::unavailable())
        }
    }
}
