//! Login and registration forms.

use crate::api::{AuthResponse, LoginRequest, RegisterRequest};
use crate::app::Route;
use crate::error::{ClientResult, ValidationError};
use crate::input::TextInput;

pub const MIN_PASSWORD_CHARS: usize = 6;

const GENERIC_ERROR: &str = "An error occurred. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthKind {
    Login,
    Register,
}

impl AuthKind {
    pub fn title(self) -> &'static str {
        match self {
            AuthKind::Login => "Welcome Back",
            AuthKind::Register => "Create Your Journal",
        }
    }

    fn success_fallback(self) -> &'static str {
        match self {
            AuthKind::Login => "Login successful! Redirecting...",
            AuthKind::Register => "Registration successful! Redirecting to login...",
        }
    }

    fn failure_fallback(self) -> &'static str {
        match self {
            AuthKind::Login => "Login failed. Please try again.",
            AuthKind::Register => "Registration failed. Please try again.",
        }
    }

    /// Where a successful submission leads.
    fn next_route(self) -> Route {
        match self {
            AuthKind::Login => Route::Dashboard,
            AuthKind::Register => Route::Login,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthField {
    Username,
    Email,
    Password,
}

impl AuthField {
    pub fn label(self) -> &'static str {
        match self {
            AuthField::Username => "Username",
            AuthField::Email => "Email",
            AuthField::Password => "Password",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormMessage {
    pub kind: MessageKind,
    pub text: String,
}

impl FormMessage {
    fn success(text: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::Success,
            text: text.into(),
        }
    }

    fn error(text: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::Error,
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthSubmission {
    Login(LoginRequest),
    Register(RegisterRequest),
}

pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.chars().count() < MIN_PASSWORD_CHARS {
        return Err(ValidationError::PasswordTooShort);
    }
    Ok(())
}

#[derive(Debug, Clone)]
pub struct AuthForm {
    kind: AuthKind,
    pub username: TextInput,
    pub email: TextInput,
    pub password: TextInput,
    focus: AuthField,
    message: Option<FormMessage>,
    submitting: bool,
}

impl AuthForm {
    pub fn new(kind: AuthKind) -> Self {
        Self {
            kind,
            username: TextInput::single_line(),
            email: TextInput::single_line(),
            password: TextInput::masked(),
            focus: AuthField::Username,
            message: None,
            submitting: false,
        }
    }

    pub fn login() -> Self {
        Self::new(AuthKind::Login)
    }

    pub fn register() -> Self {
        Self::new(AuthKind::Register)
    }

    pub fn kind(&self) -> AuthKind {
        self.kind
    }

    pub fn fields(&self) -> &'static [AuthField] {
        match self.kind {
            AuthKind::Login => &[AuthField::Username, AuthField::Password],
            AuthKind::Register => &[AuthField::Username, AuthField::Email, AuthField::Password],
        }
    }

    pub fn input(&self, field: AuthField) -> &TextInput {
        match field {
            AuthField::Username => &self.username,
            AuthField::Email => &self.email,
            AuthField::Password => &self.password,
        }
    }

    pub fn focused_input_mut(&mut self) -> &mut TextInput {
        match self.focus {
            AuthField::Username => &mut self.username,
            AuthField::Email => &mut self.email,
            AuthField::Password => &mut self.password,
        }
    }

    pub fn focus(&self) -> AuthField {
        self.focus
    }

    pub fn focus_next(&mut self) {
        let fields = self.fields();
        let at = fields.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = fields[(at + 1) % fields.len()];
    }

    pub fn focus_previous(&mut self) {
        let fields = self.fields();
        let at = fields.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = fields[(at + fields.len() - 1) % fields.len()];
    }

    pub fn message(&self) -> Option<&FormMessage> {
        self.message.as_ref()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Clears the previous message and returns the request to send, or `None`
    /// when a submission is already running or validation failed.
    pub fn begin_submit(&mut self) -> Option<AuthSubmission> {
        if self.submitting {
            tracing::debug!(kind = ?self.kind, "submit ignored, request in flight");
            return None;
        }
        self.message = None;

        let submission = match self.kind {
            AuthKind::Login => AuthSubmission::Login(LoginRequest {
                username: self.username.value().to_string(),
                password: self.password.value().to_string(),
            }),
            AuthKind::Register => {
                if let Err(e) = validate_password(self.password.value()) {
                    self.message = Some(FormMessage::error(e.to_string()));
                    return None;
                }
                AuthSubmission::Register(RegisterRequest {
                    username: self.username.value().to_string(),
                    email: self.email.value().to_string(),
                    password: self.password.value().to_string(),
                })
            }
        };

        self.submitting = true;
        Some(submission)
    }

    /// Interprets the server's answer. Returns the route to redirect to on success;
    /// the form stays locked until then.
    pub fn finish(&mut self, result: ClientResult<AuthResponse>) -> Option<Route> {
        match result {
            Ok(response) if response.success => {
                let text = response
                    .message
                    .filter(|text| !text.trim().is_empty())
                    .unwrap_or_else(|| self.kind.success_fallback().to_string());
                tracing::info!(kind = ?self.kind, "authentication request succeeded");
                self.message = Some(FormMessage::success(text));
                Some(self.kind.next_route())
            }
            Ok(response) => {
                let text = response
                    .error
                    .filter(|text| !text.trim().is_empty())
                    .unwrap_or_else(|| self.kind.failure_fallback().to_string());
                tracing::warn!(kind = ?self.kind, error = %text, "authentication rejected");
                self.message = Some(FormMessage::error(text));
                self.submitting = false;
                None
            }
            Err(e) => {
                tracing::error!(kind = ?self.kind, error = %e, "authentication request failed");
                self.message = Some(FormMessage::error(GENERIC_ERROR));
                self.submitting = false;
                None
            }
        }
    }
}
