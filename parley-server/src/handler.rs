//! Exchange dispatch.

use crate::accounts::{AccountStore, CredentialCheck};
use parley_protocol::Exchange;
use std::net::SocketAddr;
use std::sync::Arc;

/// Dispatches decoded exchanges against the account store.
///
/// The protocol is fire-and-forget: no variant produces a response
/// frame, so every outcome is observed only through the log.
pub struct ExchangeHandler {
    accounts: Arc<AccountStore>,
}

impl ExchangeHandler {
    /// Creates a handler over the shared account store.
    pub fn new(accounts: Arc<AccountStore>) -> Self {
        Self { accounts }
    }

    /// Handles one exchange from the connection at `addr`.
    pub fn handle(&self, addr: SocketAddr, exchange: &Exchange) {
        match exchange {
            Exchange::Signup(req) => {
                if self.accounts.create_account(&req.username, &req.password) {
                    tracing::info!("[{}] created user: {}", addr, req.username);
                } else {
                    tracing::info!("[{}] user exists: {}", addr, req.username);
                }
            }
            Exchange::Login(req) => {
                match self.accounts.check_credentials(&req.username, &req.password) {
                    CredentialCheck::Verified => {
                        tracing::info!("[{}] successful login: {}", addr, req.username);
                    }
                    CredentialCheck::WrongPassword => {
                        tracing::info!("[{}] incorrect password: {}", addr, req.username);
                    }
                    CredentialCheck::UnknownUser => {
                        tracing::info!("[{}] no user exists: {}", addr, req.username);
                    }
                }
            }
            Exchange::Message(req) => {
                // Messages are only recorded; there is no delivery to
                // the named receiver.
                tracing::info!(
                    "[{}] message for {}: {}",
                    addr,
                    req.receiver,
                    req.message
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use parley_protocol::{LoginRequest, MessageRequest, SignupRequest};
    use tracing_subscriber::fmt::MakeWriter;

    fn addr() -> SocketAddr {
        "127.0.0.1:9999".parse().unwrap()
    }

    #[derive(Clone, Default)]
    struct LogCapture(Arc<Mutex<Vec<u8>>>);

    impl LogCapture {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock()).into_owned()
        }
    }

    impl std::io::Write for LogCapture {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for LogCapture {
        type Writer = LogCapture;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    // Runs `f` with a subscriber that collects log output, since the
    // side-channel log is the only place outcomes are observable.
    fn capture_logs(f: impl FnOnce()) -> String {
        let capture = LogCapture::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(capture.clone())
            .with_ansi(false)
            .finish();
        tracing::subscriber::with_default(subscriber, f);
        capture.contents()
    }

    #[test]
    fn test_signup_creates_account() {
        let store = Arc::new(AccountStore::new());
        let handler = ExchangeHandler::new(store.clone());

        handler.handle(
            addr(),
            &Exchange::Signup(SignupRequest {
                username: "alice".to_string(),
                password: "secret".to_string(),
            }),
        );

        assert!(store.verify_credentials("alice", "secret"));
    }

    #[test]
    fn test_duplicate_signup_is_a_no_op() {
        let store = Arc::new(AccountStore::new());
        let handler = ExchangeHandler::new(store.clone());

        for password in ["first", "second"] {
            handler.handle(
                addr(),
                &Exchange::Signup(SignupRequest {
                    username: "alice".to_string(),
                    password: password.to_string(),
                }),
            );
        }

        assert_eq!(store.len(), 1);
        assert!(store.verify_credentials("alice", "first"));
    }

    #[test]
    fn test_login_outcomes_are_distinct_log_events() {
        let store = Arc::new(AccountStore::new());
        let handler = ExchangeHandler::new(store.clone());
        store.create_account("alice", "secret");

        let login = |username: &str, password: &str| {
            Exchange::Login(LoginRequest {
                username: username.to_string(),
                password: password.to_string(),
            })
        };

        let logs = capture_logs(|| {
            handler.handle(addr(), &login("alice", "secret"));
            handler.handle(addr(), &login("alice", "wrong"));
            handler.handle(addr(), &login("bob", "x"));
        });

        assert!(logs.contains("successful login: alice"));
        assert!(logs.contains("incorrect password: alice"));
        assert!(logs.contains("no user exists: bob"));
    }

    #[test]
    fn test_login_and_message_leave_store_untouched() {
        let store = Arc::new(AccountStore::new());
        let handler = ExchangeHandler::new(store.clone());

        handler.handle(
            addr(),
            &Exchange::Login(LoginRequest {
                username: "alice".to_string(),
                password: "secret".to_string(),
            }),
        );
        handler.handle(
            addr(),
            &Exchange::Message(MessageRequest {
                receiver: "alice".to_string(),
                message: "hi".to_string(),
            }),
        );

        assert!(store.is_empty());
    }
}
