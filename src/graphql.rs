use serde_json::json;

pub const POSTS_QUERY: &'static str = r#"
    query($pagination: PaginationInput) {
        posts(pagination: $pagination) {
            id
            dataUrl
            postedBy {
                id
                username
            }
            solved
            createdAt
        }
    }
"#;

pub const LOGIN_MUTATION: &'static str = r#"
    mutation($payload: LoginInput!) {
        login(payload: $payload) {
            id
            email
            username
            token
        }
    }
"#;

pub const ANSWER_MUTATION: &'static str = r#"
    mutation($input: AnswerInput!) {
        answer(input: $input) {
            id
        }
    }
"#;

#[derive(Hash, Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub username: String,
}

#[derive(Hash, Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub data_url: String,
    pub posted_by: Option<User>,
    pub solved: Option<bool>,
    pub created_at: String,
}

// the server omits the token for accounts it will not vouch for; the viewer
// then keeps guessing as an anonymous device
#[derive(Hash, Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginUser {
    pub id: String,
    pub email: String,
    pub username: String,
    pub token: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct GraphQlError {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct GraphQlResponse<D> {
    pub data: Option<D>,
    pub errors: Option<Vec<GraphQlError>>,
}

#[derive(Debug, Deserialize)]
pub struct PostsData {
    pub posts: Vec<Post>,
}

#[derive(Debug, Deserialize)]
pub struct LoginData {
    pub login: Option<LoginUser>,
}

#[derive(Hash, Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct AnswerReceipt {
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub struct AnswerData {
    pub answer: Option<AnswerReceipt>,
}

#[derive(Hash, Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnswerOutcome {
    Accepted,
    Rejected,
}

impl AnswerData {
    // a null answer on an otherwise well-formed reply is the server saying
    // "wrong guess"; it is the only source of Rejected
    pub fn outcome(&self) -> AnswerOutcome {
        if self.answer.is_some() {
            AnswerOutcome::Accepted
        } else {
            AnswerOutcome::Rejected
        }
    }
}

#[derive(Hash, Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pagination {
    pub limit: u32,
    pub offset: u32,
}

pub fn posts_payload(pagination: Pagination) -> serde_json::Value {
    json!({
        "query": POSTS_QUERY,
        "variables": { "pagination": pagination }
    })
}

pub fn login_payload(username: &str, password: &str) -> serde_json::Value {
    json!({
        "query": LOGIN_MUTATION,
        "variables": { "payload": { "username": username, "password": password } }
    })
}

pub fn answer_payload(post_id: &str, guess_topic: &str) -> serde_json::Value {
    json!({
        "query": ANSWER_MUTATION,
        "variables": { "input": { "guessTopic": guess_topic, "postId": post_id } }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn posts_parse_from_the_wire_shape() {
        let body = r#"{
            "posts": [
                {
                    "id": "p1",
                    "dataUrl": "/images/p1.png",
                    "postedBy": { "id": "u1", "username": "joe" },
                    "solved": false,
                    "createdAt": "2019-04-02T10:00:00Z"
                },
                {
                    "id": "p2",
                    "dataUrl": "/images/p2.png",
                    "postedBy": null,
                    "createdAt": "2019-04-03T10:00:00Z"
                }
            ]
        }"#;

        let data: PostsData = serde_json::from_str(body).unwrap();
        assert_eq!(data.posts.len(), 2);
        assert_eq!(data.posts[0].data_url, "/images/p1.png");
        assert_eq!(data.posts[0].solved, Some(false));
        assert_eq!(data.posts[0].posted_by.as_ref().unwrap().username, "joe");

        // anonymous upload, solved never sent
        assert_eq!(data.posts[1].posted_by, None);
        assert_eq!(data.posts[1].solved, None);
    }

    #[test]
    fn login_token_is_optional() {
        let with_token: LoginData = serde_json::from_str(
            r#"{ "login": { "id": "u1", "email": "joe@example.com",
                 "username": "joe", "token": "9al132kff" } }"#,
        )
        .unwrap();
        assert_eq!(with_token.login.unwrap().token, Some("9al132kff".into()));

        let without_token: LoginData = serde_json::from_str(
            r#"{ "login": { "id": "u1", "email": "joe@example.com", "username": "joe" } }"#,
        )
        .unwrap();
        assert_eq!(without_token.login.unwrap().token, None);

        let rejected: LoginData = serde_json::from_str(r#"{ "login": null }"#).unwrap();
        assert_eq!(rejected.login, None);
    }

    #[test]
    fn answer_presence_decides_the_outcome() {
        let accepted: AnswerData =
            serde_json::from_str(r#"{ "answer": { "id": "a9" } }"#).unwrap();
        assert_eq!(accepted.outcome(), AnswerOutcome::Accepted);

        let rejected: AnswerData = serde_json::from_str(r#"{ "answer": null }"#).unwrap();
        assert_eq!(rejected.outcome(), AnswerOutcome::Rejected);
    }

    #[test]
    fn answer_variables_use_the_wire_names() {
        let payload = answer_payload("p1", "dog");

        assert_eq!(payload["query"], ANSWER_MUTATION);
        assert_eq!(payload["variables"]["input"]["postId"], "p1");
        assert_eq!(payload["variables"]["input"]["guessTopic"], "dog");
    }

    #[test]
    fn pagination_serializes_inside_the_posts_payload() {
        let payload = posts_payload(Pagination {
            limit: 10,
            offset: 20,
        });

        assert_eq!(payload["variables"]["pagination"]["limit"], 10);
        assert_eq!(payload["variables"]["pagination"]["offset"], 20);
    }

    #[test]
    fn login_variables_carry_the_credentials() {
        let payload = login_payload("joe", "hunter2");

        assert_eq!(payload["variables"]["payload"]["username"], "joe");
        assert_eq!(payload["variables"]["payload"]["password"], "hunter2");
    }
}
