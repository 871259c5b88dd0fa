//! Flow tests against a mocked backend
//!
//! Drives the sign-up, sign-in, upload and query state machines end to end
//! and checks which requests actually leave the client.

mod common;

use std::time::Duration;

use common::mocks::{Call, MockApi};
use docquery::auth::{MSG_FIELDS_REQUIRED, MSG_PASSWORD_MISMATCH, MSG_SIGNIN_FAILED, MSG_SIGNUP_OK};
use docquery::query::{MSG_ASK_FAILED, MSG_EMPTY_QUESTION, MSG_NO_ANSWER};
use docquery::session::MemoryTokenStore;
use docquery::upload::{MSG_LOG_IN_FIRST, MSG_SELECT_FILE, MSG_UPLOAD_FAILED, MSG_UPLOAD_OK};
use docquery::{
    Access, AppError, AuthGate, AuthPhase, Document, ErrorKind, Navigation, QueryState, Route,
    Session, SignInFlow, SignUpFlow, UploadState,
};
use rstest::rstest;

fn signed_out() -> Session {
    Session::init(MemoryTokenStore::default())
}

fn signed_in() -> Session {
    Session::init(MemoryTokenStore::with_token("t-123"))
}

fn report() -> Document {
    Document::new("report.pdf", b"%PDF-1.4".to_vec())
}

// ============= Sign up =============

#[rstest]
#[case("", "a@x.com", "p", "p", MSG_FIELDS_REQUIRED)]
#[case("Ada", "", "p", "p", MSG_FIELDS_REQUIRED)]
#[case("Ada", "a@x.com", "", "", MSG_FIELDS_REQUIRED)]
#[case("Ada", "a@x.com", "p", "q", MSG_PASSWORD_MISMATCH)]
#[case("", "", "p", "q", MSG_PASSWORD_MISMATCH)]
#[tokio::test]
async fn test_signup_rejected_locally(
    #[case] name: &str,
    #[case] email: &str,
    #[case] password: &str,
    #[case] confirm: &str,
    #[case] expected: &str,
) {
    let api = MockApi::new();
    let mut flow = SignUpFlow::new(Duration::from_millis(10));
    flow.edit(|f| {
        f.full_name = name.into();
        f.email = email.into();
        f.password = password.into();
        f.confirm_password = confirm.into();
    });

    let err = flow.submit(&api).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(flow.message(), Some(expected));
    assert!(flow.phase().is_editable());
    assert_eq!(api.call_count(), 0);
}

#[tokio::test]
async fn test_signup_success_schedules_sign_in() {
    let api = MockApi::new();
    let mut flow = SignUpFlow::new(Duration::from_millis(1500));
    flow.edit(|f| {
        f.full_name = "Ada".into();
        f.email = "a@x.com".into();
        f.password = "p".into();
        f.confirm_password = "p".into();
    });

    let nav = flow.submit(&api).await.unwrap();

    assert_eq!(
        nav,
        Navigation::push(Route::SignIn).after(Duration::from_millis(1500))
    );
    assert_eq!(flow.phase(), AuthPhase::Succeeded);
    assert_eq!(flow.message(), Some(MSG_SIGNUP_OK));

    match api.calls().as_slice() {
        [Call::Signup(request)] => {
            assert_eq!(request.username, "Ada");
            assert_eq!(request.email, "a@x.com");
            assert_eq!(request.confirm_password, "p");
        }
        other => panic!("Unexpected calls: {:?}", other),
    }
}

#[tokio::test]
async fn test_signup_duplicate_shows_backend_detail() {
    let api = MockApi::new().with_error(AppError::from_response(
        400,
        r#"{"detail":"Username already registered"}"#,
    ));
    let mut flow = SignUpFlow::default();
    flow.edit(|f| {
        f.full_name = "Ada".into();
        f.email = "a@x.com".into();
        f.password = "p".into();
        f.confirm_password = "p".into();
    });

    assert!(flow.submit(&api).await.is_err());
    assert_eq!(flow.phase(), AuthPhase::Failed);
    assert_eq!(flow.message(), Some("Username already registered"));
}

// ============= Sign in =============

#[tokio::test]
async fn test_signin_stores_token_and_opens_upload() {
    let api = MockApi::new().with_token("abc");
    let session = signed_out();
    let mut flow = SignInFlow::new();
    flow.edit(|f| {
        f.username_or_email = "a@x.com".into();
        f.password = "p".into();
    });

    let nav = flow.submit(&api, &session).await.unwrap();

    assert_eq!(nav, Navigation::push(Route::Upload));
    assert_eq!(session.get().as_deref(), Some("abc"));
    assert_eq!(
        api.calls(),
        vec![Call::Token(docquery::types::TokenRequest {
            username: "a@x.com".into(),
            password: "p".into(),
        })]
    );
}

#[rstest]
#[case(MockApi::failing())]
#[case(MockApi::new().with_error(AppError::from_response(
    401,
    r#"{"detail":"Incorrect username or password"}"#
)))]
#[case(MockApi::new().with_error(AppError::Network("connection refused".into())))]
#[tokio::test]
async fn test_signin_failure_is_generic(#[case] api: MockApi) {
    let session = signed_out();
    let mut flow = SignInFlow::new();
    flow.edit(|f| {
        f.username_or_email = "a@x.com".into();
        f.password = "wrong".into();
    });

    assert!(flow.submit(&api, &session).await.is_err());
    assert_eq!(flow.message(), Some(MSG_SIGNIN_FAILED));
    assert!(!session.is_authenticated());
    assert_eq!(flow.form.password, "wrong");
}

// ============= Upload =============

#[tokio::test]
async fn test_upload_without_file_sends_nothing() {
    let api = MockApi::new();
    let session = signed_in();
    let mut state = UploadState::new();

    let err = state.submit(&api, &session).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(state.message(), MSG_SELECT_FILE);
    assert_eq!(api.call_count(), 0);
}

#[tokio::test]
async fn test_upload_without_session_sends_nothing() {
    let api = MockApi::new();
    let session = signed_out();
    let mut state = UploadState::new();
    state.select_file(report());

    let err = state.submit(&api, &session).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Unauthenticated);
    assert_eq!(state.message(), MSG_LOG_IN_FIRST);
    assert_eq!(api.call_count(), 0);
}

#[tokio::test]
async fn test_upload_success_unlocks_continue() {
    let api = MockApi::new();
    let session = signed_in();
    let mut state = UploadState::new();
    state.select_file(report());

    state.submit(&api, &session).await.unwrap();

    assert!(state.succeeded());
    assert!(!state.is_uploading());
    assert_eq!(state.message(), MSG_UPLOAD_OK);
    assert_eq!(state.continue_to(), Some(Navigation::push(Route::Query)));
    assert_eq!(state.receipt().and_then(|r| r.extracted_chunks), Some(3));
    assert_eq!(
        api.calls(),
        vec![Call::Upload {
            token: "t-123".into(),
            file: "report.pdf".into(),
        }]
    );
}

#[tokio::test]
async fn test_upload_failure_hides_continue() {
    let api = MockApi::failing();
    let session = signed_in();
    let mut state = UploadState::new();
    state.select_file(report());

    assert!(state.submit(&api, &session).await.is_err());
    assert!(!state.succeeded());
    assert_eq!(state.message(), MSG_UPLOAD_FAILED);
    assert!(state.continue_to().is_none());
}

// ============= Query =============

#[rstest]
#[case("")]
#[case("   ")]
#[case("\n\t")]
#[tokio::test]
async fn test_blank_question_sends_nothing(#[case] input: &str) {
    let api = MockApi::new();
    let mut state = QueryState::new();
    state.input = input.into();

    let err = state.ask(&api).await.unwrap_err();

    assert_eq!(err.to_string(), MSG_EMPTY_QUESTION);
    assert!(state.history().is_empty());
    assert_eq!(api.call_count(), 0);
}

#[tokio::test]
async fn test_questions_accumulate_in_order() {
    let api = MockApi::new().with_answer("It is a report.");
    let mut state = QueryState::new();

    for question in ["What is this?", "  Who wrote it?  ", "When?"] {
        state.input = question.into();
        state.ask(&api).await.unwrap();
    }

    let questions: Vec<_> = state.history().iter().map(|t| t.question.as_str()).collect();
    assert_eq!(questions, ["What is this?", "  Who wrote it?  ", "When?"]);
    assert!(state.history().iter().all(|t| t.answer == "It is a report."));
    assert!(state.input.is_empty());
    assert!(!state.is_loading());
}

#[tokio::test]
async fn test_question_sent_as_typed() {
    let api = MockApi::new().with_answer("A summary.");
    let mut state = QueryState::new();
    let typed = "  What is this document about?\n";
    state.input = typed.into();

    let turn = state.ask(&api).await.unwrap();

    assert_eq!(turn.question, typed);
    assert_eq!(api.calls(), vec![Call::Ask(typed.to_string())]);
    assert_eq!(state.history().last().map(|t| t.question.as_str()), Some(typed));
}

#[rstest]
#[case(MockApi::new().without_answer(), MSG_NO_ANSWER)]
#[case(MockApi::failing(), MSG_ASK_FAILED)]
#[case(
    MockApi::new().with_error(AppError::from_response(500, r#"{"detail":"No document uploaded"}"#)),
    "No document uploaded"
)]
#[tokio::test]
async fn test_failed_question_is_kept_out_of_history(
    #[case] api: MockApi,
    #[case] expected: &str,
) {
    let mut state = QueryState::new();
    state.input = "What is this?".into();

    assert!(state.ask(&api).await.is_err());

    assert!(state.history().is_empty());
    let failed = state.failed().expect("failed question recorded");
    assert_eq!(failed.question, "What is this?");
    assert_eq!(failed.error, expected);
    assert_eq!(state.input, "What is this?");
}

// ============= Routing =============

#[tokio::test]
async fn test_sign_out_locks_protected_routes_again() {
    let api = MockApi::new();
    let session = signed_out();
    let gate = AuthGate::new(session.clone());

    let mut flow = SignInFlow::new();
    flow.edit(|f| {
        f.username_or_email = "a@x.com".into();
        f.password = "p".into();
    });
    flow.submit(&api, &session).await.unwrap();
    assert_eq!(gate.check(Route::Query), Access::Allow);
    assert_eq!(gate.get_started(), Route::Upload);

    let nav = session.sign_out().unwrap();

    assert_eq!(nav, Navigation::replace(Route::SignIn));
    assert_eq!(
        gate.check(Route::Upload),
        Access::Redirect(Navigation::replace(Route::SignIn))
    );
    assert_eq!(gate.get_started(), Route::SignUp);
}
