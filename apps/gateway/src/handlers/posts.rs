//! Post handlers - validate, make one backend call, reshape the answer.

use actix_web::{HttpResponse, web};

use quill_core::domain::{CreatePost, PageRequest, Post, PostKey, UpdatePost};
use quill_shared::dto::{
    PostIdResponse, PostResponse, PostTextRequest, PostsPageResponse, StatusResponse,
};

use crate::middleware::auth::CallerId;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// Raw query parameters. Numbers are parsed by hand so each failure gets its own message.
#[derive(Debug, Default)]
pub struct PostsQuery {
    id: Option<String>,
    author_id: Option<String>,
    page_num: Option<String>,
    page_size: Option<String>,
}

impl PostsQuery {
    /// The first occurrence of a repeated key wins; unknown keys are ignored.
    fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut query = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "id" => &mut query.id,
                "author_id" => &mut query.author_id,
                "page_num" => &mut query.page_num,
                "page_size" => &mut query.page_size,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        query
    }
}

type RawQuery = web::Query<Vec<(String, String)>>;

fn parse_required<T: std::str::FromStr>(
    value: Option<&str>,
    missing: &str,
    not_a_number: &str,
) -> AppResult<T> {
    let value = value.ok_or_else(|| AppError::bad_request(missing))?;
    value
        .parse()
        .map_err(|_| AppError::bad_request(not_a_number))
}

/// `author_id` defaults to the caller.
fn author_or_caller(query: &PostsQuery, caller: CallerId) -> AppResult<i64> {
    match query.author_id.as_deref() {
        None => Ok(caller.0),
        Some(raw) => raw
            .parse()
            .map_err(|_| AppError::bad_request("author_id parameter is not a number")),
    }
}

fn text_body(body: &[u8]) -> AppResult<PostTextRequest> {
    serde_json::from_slice(body).map_err(|_| AppError::bad_request("invalid input body"))
}

fn to_response(post: Post) -> PostResponse {
    PostResponse::new(post.id, post.text, post.time_updated)
}

/// POST /posts
pub async fn create_post(
    caller: CallerId,
    state: web::Data<AppState>,
    body: web::Bytes,
) -> AppResult<HttpResponse> {
    let input = text_body(&body)?;

    let post_id = state
        .posts
        .create_post(CreatePost {
            author_id: caller.0,
            text: input.text,
        })
        .await?;

    tracing::info!(author_id = caller.0, post_id, "Post created");
    Ok(HttpResponse::Ok().json(PostIdResponse { post_id }))
}

/// PUT /posts?id=
pub async fn update_post(
    caller: CallerId,
    state: web::Data<AppState>,
    query: RawQuery,
    body: web::Bytes,
) -> AppResult<HttpResponse> {
    let query = PostsQuery::from_pairs(query.into_inner());
    let post_id = parse_required(
        query.id.as_deref(),
        "no id parameter for updated post",
        "id parameter not a number",
    )?;
    let input = text_body(&body)?;

    state
        .posts
        .update_post(UpdatePost {
            author_id: caller.0,
            post_id,
            text: input.text,
        })
        .await?;

    tracing::info!(author_id = caller.0, post_id, "Post updated");
    Ok(HttpResponse::Ok().json(StatusResponse::ok()))
}

/// DELETE /posts?id=
pub async fn delete_post(
    caller: CallerId,
    state: web::Data<AppState>,
    query: RawQuery,
) -> AppResult<HttpResponse> {
    let query = PostsQuery::from_pairs(query.into_inner());
    let post_id = parse_required(
        query.id.as_deref(),
        "no id parameter for deleted post",
        "id parameter not a number",
    )?;

    state
        .posts
        .delete_post(PostKey {
            author_id: caller.0,
            post_id,
        })
        .await?;

    tracing::info!(author_id = caller.0, post_id, "Post deleted");
    Ok(HttpResponse::Ok().json(StatusResponse::ok()))
}

/// GET /posts?id=&author_id=
pub async fn get_post(
    caller: CallerId,
    state: web::Data<AppState>,
    query: RawQuery,
) -> AppResult<HttpResponse> {
    let query = PostsQuery::from_pairs(query.into_inner());
    let author_id = author_or_caller(&query, caller)?;
    let post_id = parse_required(
        query.id.as_deref(),
        "no id parameter for post",
        "id parameter not a number",
    )?;

    let post = state
        .posts
        .get_post(PostKey { author_id, post_id })
        .await?;

    tracing::info!(caller_id = caller.0, author_id, post_id, "Post fetched");
    Ok(HttpResponse::Ok().json(to_response(post)))
}

/// GET /posts/page?author_id=&page_num=&page_size=
pub async fn get_page_of_posts(
    caller: CallerId,
    state: web::Data<AppState>,
    query: RawQuery,
) -> AppResult<HttpResponse> {
    let query = PostsQuery::from_pairs(query.into_inner());
    let author_id = author_or_caller(&query, caller)?;
    let page_num = parse_required(
        query.page_num.as_deref(),
        "no page_num parameter",
        "page_num parameter not a number",
    )?;
    let page_size = parse_required(
        query.page_size.as_deref(),
        "no page_size parameter",
        "page_size parameter not a number",
    )?;

    let page = state
        .posts
        .get_page_of_posts(PageRequest {
            author_id,
            page_num,
            page_size,
        })
        .await?;

    tracing::info!(
        caller_id = caller.0,
        author_id,
        page_num,
        page_size,
        returned = page.posts.len(),
        "Page of posts fetched"
    );
    Ok(HttpResponse::Ok().json(PostsPageResponse {
        page_num: page.page_num,
        page_size: page.page_size,
        posts: page.posts.into_iter().map(to_response).collect(),
    }))
}
