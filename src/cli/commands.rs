//! Command handlers for the terminal client
//!
//! Each subcommand drives the same flow objects the web client uses; the
//! terminal only decides how to print their state.

use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use super::output::Output;
use super::Commands;
use crate::api::DocQueryApi;
use crate::auth::{SignInFlow, SignUpFlow};
use crate::config::ClientConfig;
use crate::query::{ConversationHistory, QueryState};
use crate::routes::{Access, AuthGate, Route};
use crate::session::Session;
use crate::types::{AppError, Result};
use crate::upload::{Document, UploadState};

const QUIT_COMMANDS: [&str; 3] = [":quit", ":q", ":exit"];

pub struct Client<A> {
    api: A,
    session: Session,
    gate: AuthGate,
    config: ClientConfig,
    out: Output,
}

impl<A: DocQueryApi> Client<A> {
    pub fn new(api: A, session: Session, config: ClientConfig, out: Output) -> Self {
        let gate = AuthGate::new(session.clone());
        Self {
            api,
            session,
            gate,
            config,
            out,
        }
    }

    pub async fn run(&self, command: Commands) -> Result<()> {
        match command {
            Commands::Signup {
                name,
                email,
                password,
                confirm_password,
            } => self.signup(name, email, password, confirm_password).await,
            Commands::Signin { user, password } => self.signin(user, password).await,
            Commands::Signout => self.signout(),
            Commands::Status => {
                self.status();
                Ok(())
            }
            Commands::Upload { path } => {
                let document = Document::from_path(&path)
                    .inspect_err(|e| self.out.error(&e.to_string()))?;
                self.upload(document).await
            }
            Commands::Ask { question } => self.ask(question.join(" ")).await,
            Commands::Chat => {
                let stdin = tokio::io::BufReader::new(tokio::io::stdin());
                self.chat(stdin).await.map(|_| ())
            }
            Commands::Config => {
                let rendered = self
                    .config
                    .to_toml()
                    .inspect_err(|e| self.out.error(&e.to_string()))?;
                println!("{}", rendered);
                Ok(())
            }
        }
    }

    /// Refuse protected commands without a session, the same way the web
    /// client's router does.
    fn require(&self, route: Route) -> Result<()> {
        match self.gate.check(route) {
            Access::Allow => Ok(()),
            Access::Redirect(nav) => {
                let message = format!(
                    "Not signed in ({} requires a session, go to {})",
                    route, nav.to
                );
                self.out.error(&message);
                self.out.hint("Sign in first:");
                self.out.command("docquery signin --user <email> --password <password>");
                Err(AppError::Unauthenticated(message))
            }
        }
    }

    pub async fn signup(
        &self,
        name: String,
        email: String,
        password: String,
        confirm_password: String,
    ) -> Result<()> {
        let mut flow = SignUpFlow::new(self.config.signup_redirect_delay());
        flow.edit(|f| {
            f.full_name = name;
            f.email = email;
            f.password = password;
            f.confirm_password = confirm_password;
        });

        let result = flow.submit(&self.api).await;
        let message = flow.message().unwrap_or_default();
        match result {
            Ok(nav) => {
                self.out.success(message);
                self.out.hint(&format!("Next, sign in ({}):", nav.to));
                self.out.command("docquery signin --user <email> --password <password>");
                Ok(())
            }
            Err(e) => {
                self.out.error(message);
                Err(e)
            }
        }
    }

    pub async fn signin(&self, user: String, password: String) -> Result<()> {
        let mut flow = SignInFlow::new();
        flow.edit(|f| {
            f.username_or_email = user;
            f.password = password;
        });

        let result = flow.submit(&self.api, &self.session).await;
        let message = flow.message().unwrap_or_default();
        match result {
            Ok(_) => {
                self.out.success(message);
                self.out.hint("Upload a document next:");
                self.out.command("docquery upload <file>");
                Ok(())
            }
            Err(e) => {
                self.out.error(message);
                Err(e)
            }
        }
    }

    pub fn signout(&self) -> Result<()> {
        self.session.sign_out()?;
        self.out.success("You have been signed out.");
        Ok(())
    }

    pub fn status(&self) {
        self.out.header("Session");
        self.out.kv("backend", &self.config.api_base);
        self.out.kv(
            "signed in",
            if self.session.is_authenticated() { "yes" } else { "no" },
        );
        self.out
            .kv("token file", &self.config.session_path().display().to_string());
    }

    pub async fn upload(&self, document: Document) -> Result<()> {
        self.require(Route::Upload)?;
        if !document.is_supported() {
            self.out.warning(&format!(
                "{} is not a PDF, DOCX or TXT file; the backend may reject it",
                document.name
            ));
        }

        let mut state = UploadState::new();
        state.select_file(document);
        self.out.info(&format!(
            "Uploading {}...",
            state.file().map(|d| d.name.as_str()).unwrap_or_default()
        ));

        let result = state.submit(&self.api, &self.session).await;
        match result {
            Ok(()) => {
                self.out.success(state.message());
                if let Some(chunks) = state.receipt().and_then(|r| r.extracted_chunks) {
                    self.out.kv("chunks extracted", &chunks.to_string());
                }
                if state.continue_to().is_some() {
                    self.out.command("docquery chat");
                }
                Ok(())
            }
            Err(e) => {
                self.out.error(state.message());
                Err(e)
            }
        }
    }

    pub async fn ask(&self, question: String) -> Result<()> {
        self.require(Route::Query)?;
        let mut state = QueryState::new();
        state.input = question;
        match state.ask(&self.api).await {
            Ok(turn) => {
                self.out.turn(&turn);
                Ok(())
            }
            Err(e) => {
                match state.failed() {
                    Some(failed) => self.out.failed_question(failed),
                    None => self.out.error(&e.to_string()),
                }
                Err(e)
            }
        }
    }

    /// Read questions line by line until EOF or a quit command. Failed
    /// questions are reported and the loop goes on.
    pub async fn chat<R>(&self, input: R) -> Result<ConversationHistory>
    where
        R: AsyncBufRead + Unpin,
    {
        self.require(Route::Query)?;
        self.out.banner();
        self.out.info("Ask a question about your document. ':quit' to leave.");

        let mut state = QueryState::new();
        let mut lines = input.lines();
        loop {
            self.out.prompt();
            let line = match lines.next_line().await {
                Ok(Some(line)) => line,
                Ok(None) => break,
                Err(e) => return Err(AppError::Storage(format!("Failed to read input: {}", e))),
            };
            let command = line.trim();
            if QUIT_COMMANDS.contains(&command) {
                break;
            }
            if command.is_empty() {
                continue;
            }

            state.input = line;
            match state.ask(&self.api).await {
                Ok(turn) => self.out.turn(&turn),
                Err(e) if e.is_local() => self.out.warning(&e.to_string()),
                Err(_) => {
                    if let Some(failed) = state.failed() {
                        self.out.failed_question(failed);
                    }
                    // Nothing to edit in a line-based prompt.
                    state.input.clear();
                }
            }
        }

        self.out.newline();
        self.out
            .info(&format!("{} question(s) answered", state.history().len()));
        Ok(state.history().clone())
    }
}
