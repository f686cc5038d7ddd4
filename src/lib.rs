extern crate console_error_panic_hook;
extern crate serde;
#[macro_use]
extern crate serde_derive;
extern crate wasm_bindgen_test;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

pub mod connection;
pub mod graphql;
pub mod guess_state;
pub mod session;
pub mod storage;
pub mod submit;
pub mod validators;

use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Element, HtmlElement, HtmlInputElement, Storage};

use connection::{Api, ApiError, FetchApi};
use graphql::{Pagination, Post};
use guess_state::{card_class_name, resolve_guess_state, shared_guess_state, GuessState};
use session::{shared_session, SharedSession};
use storage::{BrowserStore, GuessStore, MemoryStore};

pub const SERVER_BASE_URL: &'static str = "http://127.0.0.1:4000";
pub const GRAPHQL_ENDPOINT: &'static str = "http://127.0.0.1:4000/graphql";
pub const GUESS_LOCAL_STORAGE_PREFIX: &'static str = "picguess_guess_";
pub const POSTS_PER_PAGE: u32 = 10;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console)]
    pub fn log(contents: &str);
}

pub fn get_local_storage() -> Option<Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

pub struct AppContext {
    pub api: FetchApi,
    pub session: SharedSession,
    pub store: Box<dyn GuessStore>,
}

impl AppContext {
    pub fn new() -> Self {
        let store: Box<dyn GuessStore> = match get_local_storage() {
            Some(storage) => Box::new(BrowserStore::new(storage)),
            // some browsers block local storage; guesses then last for the
            // page session only
            None => Box::new(MemoryStore::new()),
        };

        AppContext {
            api: FetchApi::new(GRAPHQL_ENDPOINT),
            session: shared_session(),
            store,
        }
    }
}

#[wasm_bindgen]
pub fn bootstrap() {
    std::panic::set_hook(Box::new(console_error_panic_hook::hook));

    let context = Rc::new(AppContext::new());

    spawn_local(load_and_render(context, 0));
}

pub fn document_and_root() -> (Document, Element) {
    let window = web_sys::window().unwrap();
    let document = window.document().unwrap();
    let root = document.query_selector("#picguess_root").unwrap().unwrap();

    (document, root)
}

pub async fn load_and_render(context: Rc<AppContext>, page: u32) {
    let pagination = Pagination {
        limit: POSTS_PER_PAGE,
        offset: page * POSTS_PER_PAGE,
    };

    match context.api.posts(pagination).await {
        Ok(posts) => render_page_posts(context, page, posts),
        Err(err) => {
            log(&format!("could not load posts: {}", err));
            render_page_load_failed(context, page, &err);
        }
    }
}

pub fn render_page_load_failed(context: Rc<AppContext>, page: u32, error: &ApiError) {
    let (document, root) = document_and_root();
    root.set_inner_html("");

    let label = document.create_element("div").unwrap();
    label.set_text_content(Some(&format!("Could not load posts: {}", error)));
    root.append_child(&label).unwrap();

    let retry = document.create_element("button").unwrap();
    retry.set_text_content(Some("Retry"));
    root.append_child(&retry).unwrap();

    let retry_click = Closure::<dyn FnMut()>::new(move || {
        spawn_local(load_and_render(context.clone(), page));
    });

    let retry_el = retry.dyn_ref::<HtmlElement>().unwrap();
    retry_el.set_onclick(Some(retry_click.as_ref().unchecked_ref()));

    retry_click.forget();
}

pub fn render_page_posts(context: Rc<AppContext>, page: u32, posts: Vec<Post>) {
    let (document, root) = document_and_root();
    root.set_inner_html("");

    let title = document.create_element("h2").unwrap();
    title.set_text_content(Some("PicGuess"));
    root.append_child(&title).unwrap();

    render_login_section(&document, &root, context.clone(), page);

    let status = document.create_element("div").unwrap();
    status.set_id("picguess_status");
    root.append_child(&status).unwrap();

    let cards = document.create_element("div").unwrap();
    root.append_child(&cards).unwrap();

    if posts.is_empty() {
        let empty_label = document.create_element("div").unwrap();
        empty_label.set_text_content(Some("No posts yet"));
        cards.append_child(&empty_label).unwrap();
    }

    let full_page = posts.len() == POSTS_PER_PAGE as usize;

    for post in posts {
        render_post_card(&document, &cards, context.clone(), post);
    }

    let page_ops = document.create_element("div").unwrap();
    root.append_child(&page_ops).unwrap();

    if page > 0 {
        let prev = document.create_element("button").unwrap();
        prev.set_text_content(Some("Prev"));
        page_ops.append_child(&prev).unwrap();

        let prev_context = context.clone();
        let prev_click = Closure::<dyn FnMut()>::new(move || {
            spawn_local(load_and_render(prev_context.clone(), page - 1));
        });

        let prev_el = prev.dyn_ref::<HtmlElement>().unwrap();
        prev_el.set_onclick(Some(prev_click.as_ref().unchecked_ref()));

        prev_click.forget();
    }

    let page_label = document.create_element("span").unwrap();
    page_label.set_text_content(Some(&format!("Page {}", page + 1)));
    page_ops.append_child(&page_label).unwrap();

    // a short page means there is nothing further
    if full_page {
        let next = document.create_element("button").unwrap();
        next.set_text_content(Some("Next"));
        page_ops.append_child(&next).unwrap();

        let next_context = context.clone();
        let next_click = Closure::<dyn FnMut()>::new(move || {
            spawn_local(load_and_render(next_context.clone(), page + 1));
        });

        let next_el = next.dyn_ref::<HtmlElement>().unwrap();
        next_el.set_onclick(Some(next_click.as_ref().unchecked_ref()));

        next_click.forget();
    }
}

pub fn render_login_section(
    document: &Document,
    parent: &Element,
    context: Rc<AppContext>,
    page: u32,
) {
    let section = document.create_element("div").unwrap();
    parent.append_child(&section).unwrap();

    let session = context.session.borrow().clone();

    if let Some(user) = session.user {
        let label = document.create_element("div").unwrap();
        label.set_text_content(Some(&("Logged in as ".to_owned() + &user.username)));
        section.append_child(&label).unwrap();

        let logout = document.create_element("button").unwrap();
        logout.set_text_content(Some("Logout"));
        section.append_child(&logout).unwrap();

        let logout_click = Closure::<dyn FnMut()>::new(move || {
            context.session.borrow_mut().clear();
            spawn_local(load_and_render(context.clone(), page));
        });

        let logout_el = logout.dyn_ref::<HtmlElement>().unwrap();
        logout_el.set_onclick(Some(logout_click.as_ref().unchecked_ref()));

        logout_click.forget();
    } else {
        let username_input = document.create_element("input").unwrap();
        username_input
            .dyn_ref::<HtmlInputElement>()
            .unwrap()
            .set_placeholder("Enter your username");
        section.append_child(&username_input).unwrap();

        let password_input = document.create_element("input").unwrap();
        {
            let password_el = password_input.dyn_ref::<HtmlInputElement>().unwrap();
            password_el.set_placeholder("Enter your password");
            password_el.set_type("password");
        }
        section.append_child(&password_input).unwrap();

        let login_button = document.create_element("button").unwrap();
        login_button.set_text_content(Some("Login"));
        section.append_child(&login_button).unwrap();

        let login_click = Closure::<dyn FnMut()>::new(move || {
            let username = username_input.dyn_ref::<HtmlInputElement>().unwrap().value();
            let password = password_input.dyn_ref::<HtmlInputElement>().unwrap().value();

            let valid = validators::validate_username(&username)
                .and_then(|_| validators::validate_password(&password));
            if let Err(err) = valid {
                show_message(&err.to_string());
                return;
            }

            let context = context.clone();
            spawn_local(async move {
                match context.api.login(&username, &password).await {
                    Ok(Some(login)) => {
                        context.session.borrow_mut().apply_login(login);
                        load_and_render(context, page).await;
                    }
                    Ok(None) => {
                        show_message("Login failed, check your username and password");
                    }
                    Err(err) => {
                        log(&format!("login failed: {}", err));
                        show_message(&format!("Could not log in: {}", err));
                    }
                }
            });
        });

        let login_el = login_button.dyn_ref::<HtmlElement>().unwrap();
        login_el.set_onclick(Some(login_click.as_ref().unchecked_ref()));

        login_click.forget();
    }
}

pub fn render_post_card(
    document: &Document,
    parent: &Element,
    context: Rc<AppContext>,
    post: Post,
) {
    let recorded = context.store.recorded_guess(&post.id);
    let state = shared_guess_state(resolve_guess_state(post.solved, recorded.is_some()));

    let card = document.create_element("div").unwrap();
    card.set_class_name(card_class_name(*state.borrow()));
    parent.append_child(&card).unwrap();

    let image = document.create_element("img").unwrap();
    image
        .set_attribute("src", &(SERVER_BASE_URL.to_owned() + &post.data_url))
        .unwrap();
    card.append_child(&image).unwrap();

    let author = document.create_element("div").unwrap();
    let author_name = match &post.posted_by {
        Some(user) => user.username.clone(),
        None => "Anonymous".to_owned(),
    };
    author.set_text_content(Some(&("Posted by: ".to_owned() + &author_name)));
    card.append_child(&author).unwrap();

    let form = document.create_element("div").unwrap();
    card.append_child(&form).unwrap();

    // nothing left to guess once the post is correct for this viewer
    if *state.borrow() == GuessState::Correct {
        form.set_text_content(Some("Guessed correctly"));
        return;
    }

    let guess_input = document.create_element("input").unwrap();
    guess_input
        .dyn_ref::<HtmlInputElement>()
        .unwrap()
        .set_placeholder("Enter your guess...");
    form.append_child(&guess_input).unwrap();

    let submit_button = document.create_element("button").unwrap();
    submit_button.set_text_content(Some("Guess"));
    form.append_child(&submit_button).unwrap();

    let post_id = post.id;
    let submit_click = Closure::<dyn FnMut()>::new(move || {
        let guess = guess_input.dyn_ref::<HtmlInputElement>().unwrap().value();

        if let Err(err) = validators::validate_guess(&guess) {
            show_message(&err.to_string());
            return;
        }

        let context = context.clone();
        let state = state.clone();
        let card = card.clone();
        let form = form.clone();
        let post_id = post_id.clone();

        spawn_local(async move {
            let session = context.session.borrow().clone();
            let result = submit::submit_guess(
                &context.api,
                &session,
                &*context.store,
                &state,
                &post_id,
                &guess,
            )
            .await;

            match result {
                Ok(GuessState::Correct) => {
                    show_message(&format!("You got {} right! 🎉", guess));
                }
                Ok(_) => {
                    show_message(&format!("{} is not a correct answer, keep guessing 🤨", guess));
                }
                Err(submit::SubmitError::Record(err)) => {
                    // accepted by the server, only the device record failed
                    log(&format!("could not record the guess: {}", err));
                    show_message(&format!("You got {} right! 🎉", guess));
                }
                Err(err) => {
                    log(&format!("guess submission failed: {}", err));
                    show_message(&format!("Could not submit your guess: {}", err));
                }
            }

            card.set_class_name(card_class_name(*state.borrow()));
            if *state.borrow() == GuessState::Correct {
                form.set_text_content(Some("Guessed correctly"));
            }
        });
    });

    let submit_el = submit_button.dyn_ref::<HtmlElement>().unwrap();
    submit_el.set_onclick(Some(submit_click.as_ref().unchecked_ref()));

    submit_click.forget();
}

pub fn show_message(text: &str) {
    let (document, _root) = document_and_root();

    if let Some(status) = document.query_selector("#picguess_status").unwrap() {
        status.set_text_content(Some(text));
    }
}
