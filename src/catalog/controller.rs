use axum::{
    extract::{rejection::{JsonRejection, QueryRejection}, Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use serde_json::Value;
use tower_http::trace::TraceLayer;
use crate::books::dto::BookPayload;
use crate::catalog::command::add_book_cmd::{ADD_BOOK_FAILED, AddBookCommand, AddBookCommandRequest, AddBookCommandResponse};
use crate::catalog::command::get_book_cmd::{GetBookCommand, GetBookCommandRequest, GetBookCommandResponse};
use crate::catalog::command::list_books_cmd::{LIST_BOOKS_FAILED, ListBooksCommand, ListBooksCommandRequest, ListBooksCommandResponse};
use crate::catalog::command::remove_book_cmd::{RemoveBookCommand, RemoveBookCommandRequest};
use crate::catalog::command::update_book_cmd::{UPDATE_BOOK_FAILED, UpdateBookCommand, UpdateBookCommandRequest};
use crate::catalog::domain::CatalogService;
use crate::catalog::factory;
use crate::core::command::{Command, CommandError};
use crate::core::controller::{ApiResponse, AppState, json_to_server_error, ServerError};

pub(crate) const BOOK_ADDED: &str = "Book added successfully";
pub(crate) const BOOK_UPDATED: &str = "Book updated successfully";
pub(crate) const BOOK_DELETED: &str = "Book deleted successfully";

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/books", get(find_books).post(add_book))
        .route("/books/:id",
               get(find_book_by_id).put(update_book).delete(remove_book))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn build_service(state: &AppState) -> Box<dyn CatalogService> {
    factory::create_catalog_service(&state.config, state.books.clone())
}

fn parse_payload(action: &str, json: Result<Json<Value>, JsonRejection>) -> Result<BookPayload, ServerError> {
    let Json(value) = json.map_err(|err| json_to_server_error(action, err.body_text()))?;
    serde_json::from_value(value).map_err(|err| json_to_server_error(action, err))
}

pub(crate) async fn add_book(
    State(state): State<AppState>,
    json: Result<Json<Value>, JsonRejection>) -> Result<(StatusCode, Json<ApiResponse<AddBookCommandResponse>>), ServerError> {
    let req = AddBookCommandRequest::new(parse_payload(ADD_BOOK_FAILED, json)?);
    let res = AddBookCommand::new(build_service(&state)).execute(req).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::message_with_data(BOOK_ADDED, res))))
}

pub(crate) async fn find_books(
    State(state): State<AppState>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>) -> Result<Json<ApiResponse<ListBooksCommandResponse>>, ServerError> {
    let Query(pairs) = query.map_err(|err| json_to_server_error(LIST_BOOKS_FAILED, err.body_text()))?;
    let req = ListBooksCommandRequest::from_query_pairs(pairs);
    let res = ListBooksCommand::new(build_service(&state)).execute(req).await?;
    Ok(Json(ApiResponse::data(res)))
}

pub(crate) async fn find_book_by_id(
    State(state): State<AppState>,
    Path(book_id): Path<String>) -> Result<Json<ApiResponse<GetBookCommandResponse>>, ServerError> {
    let req = GetBookCommandRequest::new(book_id);
    let res = GetBookCommand::new(build_service(&state)).execute(req).await?;
    Ok(Json(ApiResponse::data(res)))
}

// Unknown ids answer 404 even when the body is invalid.
pub(crate) async fn update_book(
    State(state): State<AppState>,
    Path(book_id): Path<String>,
    json: Result<Json<Value>, JsonRejection>) -> Result<Json<ApiResponse<()>>, ServerError> {
    let svc = build_service(&state);
    let book = match parse_payload(UPDATE_BOOK_FAILED, json) {
        Ok(book) => book,
        Err(err) => {
            let _ = svc.find_book_by_id(book_id.as_str()).await
                .map_err(|e| ServerError::from(CommandError::from(e).context(UPDATE_BOOK_FAILED)))?;
            return Err(err);
        }
    };
    let req = UpdateBookCommandRequest::new(book_id.as_str(), book);
    let _ = UpdateBookCommand::new(svc).execute(req).await?;
    Ok(Json(ApiResponse::message(BOOK_UPDATED)))
}

pub(crate) async fn remove_book(
    State(state): State<AppState>,
    Path(book_id): Path<String>) -> Result<Json<ApiResponse<()>>, ServerError> {
    let req = RemoveBookCommandRequest::new(book_id);
    let _ = RemoveBookCommand::new(build_service(&state)).execute(req).await?;
    Ok(Json(ApiResponse::message(BOOK_DELETED)))
}

#[cfg(test)]
mod tests {
    use axum::body::{Body, to_bytes};
    use axum::http::{Method, Request, StatusCode};
    use axum::Router;
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use crate::catalog::controller::build_router;
    use crate::core::controller::AppState;
    use crate::core::domain::Configuration;

    fn app() -> Router {
        build_router(AppState::new(Configuration::default()))
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let req = match body {
            Some(body) => builder.header("content-type", "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }.expect("should build request");
        let res = app.clone().oneshot(req).await.expect("should handle request");
        let status = res.status();
        let bytes = to_bytes(res.into_body(), usize::MAX).await.expect("should read body");
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    async fn add(app: &Router, body: Value) -> String {
        let (status, res) = send(app, Method::POST, "/books", Some(body)).await;
        assert_eq!(StatusCode::CREATED, status);
        res["data"]["bookId"].as_str().expect("should return book id").to_string()
    }

    fn book(name: &str, page_count: i64, read_page: i64, reading: bool) -> Value {
        json!({
            "name": name,
            "year": 2010,
            "author": "John Doe",
            "summary": "Lorem ipsum dolor sit amet",
            "publisher": "Dicoding Indonesia",
            "pageCount": page_count,
            "readPage": read_page,
            "reading": reading
        })
    }

    #[tokio::test]
    async fn test_should_add_book() {
        let app = app();
        let (status, res) = send(&app, Method::POST, "/books", Some(book("Dune", 500, 500, false))).await;
        assert_eq!(StatusCode::CREATED, status);
        assert_eq!("success", res["status"]);
        assert_eq!("Book added successfully", res["message"]);
        let id = res["data"]["bookId"].as_str().expect("should return book id");

        let (status, res) = send(&app, Method::GET, format!("/books/{}", id).as_str(), None).await;
        assert_eq!(StatusCode::OK, status);
        let stored = &res["data"]["book"];
        assert_eq!(id, stored["id"]);
        assert_eq!("Dune", stored["name"]);
        assert_eq!(2010, stored["year"]);
        assert_eq!(true, stored["finished"]);
        assert_eq!(false, stored["reading"]);
        assert_eq!(stored["insertedAt"], stored["updatedAt"]);
    }

    #[tokio::test]
    async fn test_should_reject_invalid_books() {
        let app = app();
        let (status, res) = send(&app, Method::POST, "/books", Some(json!({"pageCount": 10, "readPage": 1}))).await;
        assert_eq!(StatusCode::BAD_REQUEST, status);
        assert_eq!(json!({"status": "fail", "message": "Failed to add book. Please provide the book name"}), res);

        let (status, res) = send(&app, Method::POST, "/books", Some(book("Foo", 100, 150, false))).await;
        assert_eq!(StatusCode::BAD_REQUEST, status);
        assert_eq!("Failed to add book. readPage must not be greater than pageCount", res["message"]);

        let (status, res) = send(&app, Method::POST, "/books", Some(json!({"name": "Foo", "pageCount": "many"}))).await;
        assert_eq!(StatusCode::BAD_REQUEST, status);
        assert_eq!("fail", res["status"]);

        let (_, res) = send(&app, Method::GET, "/books", None).await;
        assert_eq!(json!({"status": "success", "data": {"books": []}}), res);
    }

    #[tokio::test]
    async fn test_should_list_with_filters() {
        let app = app();
        let web = add(&app, book("Learning Web Development", 300, 40, true)).await;
        let dune = add(&app, book("Dune", 500, 500, false)).await;
        let webpack = add(&app, book("webpack in action", 200, 0, false)).await;

        let (status, res) = send(&app, Method::GET, "/books", None).await;
        assert_eq!(StatusCode::OK, status);
        assert_eq!(json!([
            {"id": web, "name": "Learning Web Development", "publisher": "Dicoding Indonesia"},
            {"id": dune, "name": "Dune", "publisher": "Dicoding Indonesia"},
            {"id": webpack, "name": "webpack in action", "publisher": "Dicoding Indonesia"},
        ]), res["data"]["books"]);

        let ids = |res: &Value| -> Vec<String> {
            res["data"]["books"].as_array().expect("books array").iter()
                .map(|b| b["id"].as_str().unwrap_or_default().to_string()).collect()
        };

        let (_, res) = send(&app, Method::GET, "/books?name=WEB", None).await;
        assert_eq!(vec![web.clone(), webpack.clone()], ids(&res));

        let (_, res) = send(&app, Method::GET, "/books?reading=1", None).await;
        assert_eq!(vec![web.clone()], ids(&res));

        let (_, res) = send(&app, Method::GET, "/books?reading=0", None).await;
        assert_eq!(vec![dune.clone(), webpack.clone()], ids(&res));

        let (_, res) = send(&app, Method::GET, "/books?finished=1", None).await;
        assert_eq!(vec![dune.clone()], ids(&res));

        let (_, res) = send(&app, Method::GET, "/books?name=web&finished=0&reading=", None).await;
        assert_eq!(vec![web, webpack], ids(&res));

        let (status, res) = send(&app, Method::GET, "/books?name=tolkien", None).await;
        assert_eq!(StatusCode::OK, status);
        assert_eq!(json!({"status": "success", "data": {"books": []}}), res);
    }

    #[tokio::test]
    async fn test_should_accept_repeated_query_keys() {
        let app = app();
        let _ = add(&app, book("Learning Web Development", 300, 40, true)).await;
        let dune = add(&app, book("Dune", 500, 500, false)).await;

        let (status, res) = send(&app, Method::GET, "/books?reading=1&reading=0", None).await;
        assert_eq!(StatusCode::OK, status);
        assert_eq!("success", res["status"]);
        assert_eq!(json!([{"id": dune, "name": "Dune", "publisher": "Dicoding Indonesia"}]), res["data"]["books"]);

        let (status, res) = send(&app, Method::GET, "/books?name=dune&name=web", None).await;
        assert_eq!(StatusCode::OK, status);
        assert_eq!(json!([]), res["data"]["books"]);
    }

    #[tokio::test]
    async fn test_should_store_untyped_fields_verbatim() {
        let app = app();
        let body = json!({
            "name": "Dune",
            "year": "1965",
            "author": ["Frank Herbert", "Brian Herbert"],
            "summary": {"short": "Spice"},
            "publisher": null,
            "pageCount": 500.5,
            "readPage": 12,
            "reading": null
        });
        let (status, res) = send(&app, Method::POST, "/books", Some(body)).await;
        assert_eq!(StatusCode::CREATED, status);
        let id = res["data"]["bookId"].as_str().expect("should return book id").to_string();

        let (status, res) = send(&app, Method::GET, format!("/books/{}", id).as_str(), None).await;
        assert_eq!(StatusCode::OK, status);
        let stored = &res["data"]["book"];
        assert_eq!("1965", stored["year"]);
        assert_eq!(json!(["Frank Herbert", "Brian Herbert"]), stored["author"]);
        assert_eq!(json!({"short": "Spice"}), stored["summary"]);
        assert_eq!(Some(&Value::Null), stored.get("publisher"));
        assert_eq!(500.5, stored["pageCount"]);
        assert_eq!(false, stored["finished"]);
        assert!(stored.get("reading").is_none());

        let (_, res) = send(&app, Method::GET, "/books", None).await;
        assert_eq!(json!([{"id": id, "name": "Dune", "publisher": null}]), res["data"]["books"]);
        let (_, res) = send(&app, Method::GET, "/books?reading=0", None).await;
        assert_eq!(json!([]), res["data"]["books"]);
    }

    #[tokio::test]
    async fn test_should_omit_absent_fields() {
        let app = app();
        let id = add(&app, json!({"name": "Notes"})).await;
        let (_, res) = send(&app, Method::GET, format!("/books/{}", id).as_str(), None).await;
        let stored = res["data"]["book"].as_object().expect("book object");
        let mut keys: Vec<&str> = stored.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(vec!["finished", "id", "insertedAt", "name", "updatedAt"], keys);
        assert_eq!(Some(&json!(true)), stored.get("finished"));
    }

    #[tokio::test]
    async fn test_should_report_missing_book() {
        let app = app();
        let (status, res) = send(&app, Method::GET, "/books/xxxxx", None).await;
        assert_eq!(StatusCode::NOT_FOUND, status);
        assert_eq!(json!({"status": "fail", "message": "Book not found"}), res);
    }

    #[tokio::test]
    async fn test_should_update_book() {
        let app = app();
        let id = add(&app, book("Dune", 500, 500, false)).await;
        let uri = format!("/books/{}", id);
        let (_, before) = send(&app, Method::GET, uri.as_str(), None).await;

        let (status, res) = send(&app, Method::PUT, uri.as_str(), Some(book("Dune Messiah", 300, 10, true))).await;
        assert_eq!(StatusCode::OK, status);
        assert_eq!(json!({"status": "success", "message": "Book updated successfully"}), res);

        let (_, after) = send(&app, Method::GET, uri.as_str(), None).await;
        let (before, after) = (&before["data"]["book"], &after["data"]["book"]);
        assert_eq!("Dune Messiah", after["name"]);
        assert_eq!(300, after["pageCount"]);
        assert_eq!(10, after["readPage"]);
        assert_eq!(true, after["reading"]);
        assert_eq!(before["id"], after["id"]);
        assert_eq!(before["finished"], after["finished"]);
        assert_eq!(before["insertedAt"], after["insertedAt"]);
        assert_eq!(before["updatedAt"], after["updatedAt"]);
    }

    #[tokio::test]
    async fn test_should_reject_invalid_update() {
        let app = app();
        let (status, res) = send(&app, Method::PUT, "/books/xxxxx", Some(json!({}))).await;
        assert_eq!(StatusCode::NOT_FOUND, status);
        assert_eq!("Failed to update book. Id not found", res["message"]);

        let (status, res) = send(&app, Method::PUT, "/books/xxxxx", None).await;
        assert_eq!(StatusCode::NOT_FOUND, status);
        assert_eq!("Failed to update book. Id not found", res["message"]);

        let id = add(&app, book("Dune", 500, 500, false)).await;
        let uri = format!("/books/{}", id);
        let (status, res) = send(&app, Method::PUT, uri.as_str(), Some(json!({"year": 2000}))).await;
        assert_eq!(StatusCode::BAD_REQUEST, status);
        assert_eq!("Failed to update book. Please provide the book name", res["message"]);

        let (status, res) = send(&app, Method::PUT, uri.as_str(), Some(book("Dune", 100, 150, false))).await;
        assert_eq!(StatusCode::BAD_REQUEST, status);
        assert_eq!("Failed to update book. readPage must not be greater than pageCount", res["message"]);

        let (status, res) = send(&app, Method::PUT, uri.as_str(), None).await;
        assert_eq!(StatusCode::BAD_REQUEST, status);
        assert_eq!("fail", res["status"]);
    }

    #[tokio::test]
    async fn test_should_delete_book_once() {
        let app = app();
        let first = add(&app, book("Emma", 300, 20, false)).await;
        let dune = add(&app, book("Dune", 500, 500, false)).await;
        let last = add(&app, book("Ulysses", 700, 5, true)).await;
        let uri = format!("/books/{}", dune);

        let (status, res) = send(&app, Method::DELETE, uri.as_str(), None).await;
        assert_eq!(StatusCode::OK, status);
        assert_eq!(json!({"status": "success", "message": "Book deleted successfully"}), res);

        let (status, res) = send(&app, Method::DELETE, uri.as_str(), None).await;
        assert_eq!(StatusCode::NOT_FOUND, status);
        assert_eq!(json!({"status": "fail", "message": "Failed to delete book. Id not found"}), res);

        let (_, res) = send(&app, Method::GET, "/books", None).await;
        let remaining: Vec<&str> = res["data"]["books"].as_array().expect("books array").iter()
            .filter_map(|b| b["id"].as_str()).collect();
        assert_eq!(vec![first.as_str(), last.as_str()], remaining);
    }

    #[tokio::test]
    async fn test_should_isolate_state_per_router() {
        let first = app();
        let second = app();
        let _ = add(&first, book("Dune", 500, 500, false)).await;
        let (_, res) = send(&second, Method::GET, "/books", None).await;
        assert_eq!(json!([]), res["data"]["books"]);
    }
}
