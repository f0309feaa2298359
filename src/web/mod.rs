//! HTTP boundary: routing, sessions, form binding, responses.

pub mod form;
pub mod handlers;
pub mod session;
pub mod views;

use crate::app::{ItemCreateReq, ItemStore, ItemUpdateReq};
use crate::config::{AppConfig, StoreKind};
use crate::error::AppError;
use crate::infra::{init_db, FlashRegistry, FlashSlot, MemoryItemStore};
use form::{query_param, Form};
use http::header::{CONTENT_TYPE, LOCATION, SET_COOKIE};
use http::{HeaderValue, Method, Request, Response, StatusCode};
use session::Session;
use views::View;

/// Outcome of a handler before it is turned into a response.
#[derive(Debug)]
pub enum Reply {
    Page(View),
    /// 303 See Other: the client follows up with a GET.
    SeeOther(String),
    Error(StatusCode, AppError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Route {
    List,
    NewForm,
    Create,
    EditForm(i64),
    Update(i64),
    Delete(i64),
}

fn route(method: &Method, path: &str) -> Result<Route, Reply> {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    let get = *method == Method::GET;
    let post = *method == Method::POST;
    let not_allowed = || {
        Reply::Error(
            StatusCode::METHOD_NOT_ALLOWED,
            AppError::Validation(format!("method {} not allowed on {}", method, path)),
        )
    };
    let not_found = || {
        Reply::Error(
            StatusCode::NOT_FOUND,
            AppError::NotFound(format!("route {}", path)),
        )
    };

    let id = |raw: &str| raw.parse::<i64>().map_err(|_| not_found());

    match segments.as_slice() {
        [] if get => Ok(Route::List),
        ["items", "new"] if get => Ok(Route::NewForm),
        ["items"] if post => Ok(Route::Create),
        ["items", raw, "edit"] if get => Ok(Route::EditForm(id(*raw)?)),
        ["items", raw, "delete"] if get || post => Ok(Route::Delete(id(*raw)?)),
        ["items", raw] if post && *raw != "new" => Ok(Route::Update(id(*raw)?)),
        [] | ["items"] | ["items", _] | ["items", _, "edit"] | ["items", _, "delete"] => {
            Err(not_allowed())
        }
        _ => Err(not_found()),
    }
}

/// The application: one item store and the session flash slots.
pub struct App {
    store: Box<dyn ItemStore>,
    flashes: FlashRegistry,
}

impl App {
    pub fn new(store: Box<dyn ItemStore>) -> Self {
        Self::with_flashes(store, FlashRegistry::new())
    }

    pub fn with_flashes(store: Box<dyn ItemStore>, flashes: FlashRegistry) -> Self {
        Self { store, flashes }
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, AppError> {
        log::info!("item store: {}", config.store.as_str());
        let store: Box<dyn ItemStore> = match config.store {
            StoreKind::Sqlite => {
                let db_path = config.resolved_db_path();
                log::info!("DB path: {:?}", db_path);
                let pool = init_db(&db_path).map_err(|e| {
                    log::error!("DB init failed: {}", e);
                    e
                })?;
                Box::new(pool)
            }
            StoreKind::Memory => Box::new(MemoryItemStore::new()),
        };
        Ok(Self::new(store))
    }

    pub fn store(&self) -> &dyn ItemStore {
        self.store.as_ref()
    }

    pub fn flashes(&self) -> &FlashRegistry {
        &self.flashes
    }

    pub fn flash<'a>(&'a self, session_id: &'a str) -> FlashSlot<'a> {
        self.flashes.slot(session_id)
    }

    pub fn handle(&self, req: Request<String>) -> Response<String> {
        let session = Session::from_headers(req.headers());
        log::debug!("{} {}", req.method(), req.uri().path());

        let reply = match route(req.method(), req.uri().path()) {
            Ok(r) => self
                .dispatch(r, &session, &req)
                .unwrap_or_else(|e| match e {
                    AppError::Validation(_) | AppError::MissingField(_) => {
                        log::warn!("form rejected: {}", e);
                        Reply::Error(StatusCode::UNPROCESSABLE_ENTITY, e)
                    }
                    e => {
                        log::error!("request failed: {}", e);
                        Reply::Error(StatusCode::INTERNAL_SERVER_ERROR, e)
                    }
                }),
            Err(reply) => reply,
        };

        let mut resp = into_response(reply);
        if session.is_new {
            match HeaderValue::from_str(&session.set_cookie()) {
                Ok(v) => {
                    resp.headers_mut().insert(SET_COOKIE, v);
                }
                Err(e) => log::error!("session cookie rejected: {}", e),
            }
        }
        resp
    }

    fn dispatch(
        &self,
        route: Route,
        session: &Session,
        req: &Request<String>,
    ) -> Result<Reply, AppError> {
        let store = self.store();
        let flash = self.flash(&session.id);
        match route {
            Route::List => handlers::list_items(store, &flash, query_param(req.uri(), "q")),
            Route::NewForm => handlers::new_item_form(&flash),
            Route::Create => {
                let form = Form::parse(req.body());
                let req = ItemCreateReq {
                    name: form.required("name")?,
                    description: form.required("description")?,
                };
                handlers::create_item(store, &flash, req)
            }
            Route::EditForm(id) => handlers::edit_item_form(store, &flash, id),
            Route::Update(id) => {
                let form = Form::parse(req.body());
                let req = ItemUpdateReq {
                    id,
                    name: form.required("name")?,
                    description: form.required("description")?,
                };
                handlers::update_item(store, &flash, req)
            }
            Route::Delete(id) => handlers::delete_item(store, &flash, id),
        }
    }
}

fn json_response(status: StatusCode, body: String) -> Response<String> {
    let mut resp = Response::new(body);
    *resp.status_mut() = status;
    resp.headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    resp
}

fn error_response(status: StatusCode, err: &AppError) -> Response<String> {
    let body = serde_json::to_string(err)
        .unwrap_or_else(|_| format!("{{\"code\":\"{}\"}}", err.code()));
    json_response(status, body)
}

fn into_response(reply: Reply) -> Response<String> {
    match reply {
        Reply::Page(view) => match serde_json::to_string(&view) {
            Ok(body) => json_response(StatusCode::OK, body),
            Err(e) => error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                &AppError::Internal(e.to_string()),
            ),
        },
        Reply::SeeOther(location) => match HeaderValue::try_from(location) {
            Ok(v) => {
                let mut resp = Response::new(String::new());
                *resp.status_mut() = StatusCode::SEE_OTHER;
                resp.headers_mut().insert(LOCATION, v);
                resp
            }
            Err(e) => error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                &AppError::Internal(e.to_string()),
            ),
        },
        Reply::Error(status, err) => error_response(status, &err),
    }
}
