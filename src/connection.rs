use async_trait::async_trait;
use thiserror::Error;

use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestInit, RequestMode, Response};

use crate::graphql::{
    answer_payload, login_payload, posts_payload, AnswerData, AnswerOutcome, GraphQlResponse,
    LoginData, LoginUser, Pagination, Post, PostsData,
};
use crate::log;

#[derive(Error, Debug)]
pub enum ApiError {
    // the request never produced a reply: network down, dns, cors, ...
    #[error("could not reach the server: {0}")]
    Transport(String),
    #[error("server replied with status {0}")]
    Status(u16),
    #[error("could not read the server reply: {0}")]
    BadResponse(String),
    // a graphql-level error; never interpreted as a wrong guess
    #[error("server reported: {0}")]
    Server(String),
}

#[async_trait(?Send)]
pub trait Api {
    async fn posts(&self, pagination: Pagination) -> Result<Vec<Post>, ApiError>;

    // Ok(None) means the server rejected the credentials
    async fn login(&self, username: &str, password: &str)
        -> Result<Option<LoginUser>, ApiError>;

    async fn submit_answer(
        &self,
        post_id: &str,
        guess_topic: &str,
    ) -> Result<AnswerOutcome, ApiError>;
}

pub struct FetchApi {
    endpoint: String,
}

impl FetchApi {
    pub fn new(endpoint: &str) -> Self {
        FetchApi {
            endpoint: endpoint.to_owned(),
        }
    }

    async fn post_graphql(&self, payload: serde_json::Value) -> Result<String, ApiError> {
        let opts = RequestInit::new();
        opts.set_method("POST");
        opts.set_mode(RequestMode::Cors);
        opts.set_body(&JsValue::from_str(&payload.to_string()));

        let headers = Headers::new().map_err(transport)?;
        headers
            .append("Content-Type", "application/json")
            .map_err(transport)?;
        opts.set_headers(&headers);

        let request =
            Request::new_with_str_and_init(&self.endpoint, &opts).map_err(transport)?;

        let window =
            web_sys::window().ok_or_else(|| ApiError::Transport("no window".to_owned()))?;
        let response_value = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(transport)?;
        let response: Response = response_value
            .dyn_into()
            .map_err(|_value| ApiError::Transport("fetch returned no response".to_owned()))?;

        if !response.ok() {
            return Err(ApiError::Status(response.status()));
        }

        let text_value = JsFuture::from(response.text().map_err(transport)?)
            .await
            .map_err(transport)?;
        let body = text_value
            .as_string()
            .ok_or_else(|| ApiError::BadResponse("reply body was not text".to_owned()))?;

        log(&format!("got graphql reply: {:?}", body));

        Ok(body)
    }
}

#[async_trait(?Send)]
impl Api for FetchApi {
    async fn posts(&self, pagination: Pagination) -> Result<Vec<Post>, ApiError> {
        let body = self.post_graphql(posts_payload(pagination)).await?;
        let data: PostsData = unwrap_data(&body)?;

        Ok(data.posts)
    }

    async fn login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<LoginUser>, ApiError> {
        let body = self.post_graphql(login_payload(username, password)).await?;
        let data: LoginData = unwrap_data(&body)?;

        Ok(data.login)
    }

    async fn submit_answer(
        &self,
        post_id: &str,
        guess_topic: &str,
    ) -> Result<AnswerOutcome, ApiError> {
        let body = self
            .post_graphql(answer_payload(post_id, guess_topic))
            .await?;
        let data: AnswerData = unwrap_data(&body)?;

        Ok(data.outcome())
    }
}

fn transport(value: JsValue) -> ApiError {
    let text = value
        .as_string()
        .unwrap_or_else(|| format!("{:?}", value));

    ApiError::Transport(text)
}

fn unwrap_data<D>(body: &str) -> Result<D, ApiError>
where
    D: serde::de::DeserializeOwned,
{
    let response: GraphQlResponse<D> =
        serde_json::from_str(body).map_err(|err| ApiError::BadResponse(err.to_string()))?;

    if let Some(errors) = response.errors {
        if let Some(first) = errors.first() {
            return Err(ApiError::Server(first.message.clone()));
        }
    }

    response
        .data
        .ok_or_else(|| ApiError::BadResponse("reply carried no data".to_owned()))
}
