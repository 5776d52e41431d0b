use async_trait::async_trait;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Stdin};
use tokio::sync::Mutex;

use crate::core::auth::{ApprovalCodeProvider, AuthError};

/// Asks the operator to open the consent page and paste back the code Google shows.
pub struct ConsoleApproval<R> {
    input: Mutex<R>,
}

impl ConsoleApproval<BufReader<Stdin>> {
    pub fn stdin() -> Self {
        Self::new(BufReader::new(tokio::io::stdin()))
    }
}

impl<R> ConsoleApproval<R>
where
    R: AsyncBufRead + Unpin + Send,
{
    pub fn new(input: R) -> Self {
        Self {
            input: Mutex::new(input),
        }
    }
}

#[async_trait]
impl<R> ApprovalCodeProvider for ConsoleApproval<R>
where
    R: AsyncBufRead + Unpin + Send,
{
    async fn approval_code(&self, authorize_url: &str) -> Result<String, AuthError> {
        // Prompts go to stdout, not the log: the operator has to see them.
        println!(
            "Go to the following link in your browser then type the authorization code:\n\n{}\n",
            authorize_url
        );
        println!("Paste here the authorization code:");

        let mut line = String::new();
        let read = self
            .input
            .lock()
            .await
            .read_line(&mut line)
            .await
            .map_err(|e| AuthError::Interactive(format!("cannot read authorization code: {}", e)))?;

        if read == 0 {
            return Err(AuthError::Interactive(
                "input closed before an authorization code was entered".to_string(),
            ));
        }

        Ok(line.trim().to_string())
    }
}
