use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::{
    dispatcher::Dispatcher,
    envelope::Envelope,
    error::{OcppError, OcppResult, ResponderResult},
};

/// Answers calls from `input` on `output` until `input` ends.
///
/// Each line is answered, written and flushed before the next one is read.
/// Lines that cannot be answered are logged and skipped.
pub(crate) async fn run_responder<R, W>(
    mut dispatcher: Dispatcher,
    mut input: R,
    mut output: W,
) -> ResponderResult<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut buffer = Vec::new();

    loop {
        buffer.clear();
        if input.read_until(b'\n', &mut buffer).await? == 0 {
            break;
        }

        let response = match std::str::from_utf8(&buffer) {
            Ok(line) => handle_line(&mut dispatcher, line),
            Err(error) => Err(OcppError::MalformedMessage {
                details: error.to_string(),
            }),
        };

        match response {
            Ok(Some(response)) => {
                output.write_all(response.as_bytes()).await?;
                output.write_all(b"\n").await?;
                output.flush().await?;
            }
            Ok(None) => {}
            Err(error) => tracing::error!("{error}"),
        }
    }

    tracing::info!("Input closed, shutting down");
    Ok(())
}

fn handle_line(dispatcher: &mut Dispatcher, line: &str) -> OcppResult<Option<String>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    match Envelope::decode(line)? {
        Envelope::Call {
            unique_id,
            action,
            payload,
        } => {
            let response = dispatcher.dispatch(&action, payload, &unique_id)?.to_line()?;
            tracing::debug!("Sending response for '{action}': {response}");
            Ok(Some(response))
        }
        _ => {
            tracing::debug!("Ignoring non-call message: {line}");
            Ok(None)
        }
    }
}
