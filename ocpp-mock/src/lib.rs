use tokio::io::{self, AsyncBufRead, AsyncWrite, BufReader};

pub use configuration::{ConfigurationEntry, ConfigurationTable};
pub use dispatcher::Dispatcher;
pub use envelope::{Envelope, Payload};
pub use error::{OcppError, OcppResult, ResponderError, ResponderResult};
pub use messages::start_transaction::TransactionIdRange;
pub use rust_ocpp;

mod configuration;
mod dispatcher;
mod envelope;
mod error;
mod messages;
mod responder_loop;

use responder_loop::run_responder;

#[derive(Clone, Debug, Default)]
pub struct Config {
    transaction_ids: TransactionIdRange,
}

impl Config {
    #[must_use]
    pub fn new(transaction_ids: TransactionIdRange) -> Self {
        Self { transaction_ids }
    }
}

pub struct Responder {
    dispatcher: Dispatcher,
}

impl Responder {
    /// Answers calls read from `input` on `output` until `input` is exhausted.
    ///
    /// # Errors
    ///
    /// Returns [`ResponderError::Io`] if reading `input` or writing `output`
    /// fails. Malformed or unanswerable lines are logged and skipped instead.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # async fn example() -> ocpp_mock::ResponderResult<()> {
    /// use ocpp_mock::{Config, ResponderBuilder};
    ///
    /// let input: &[u8] = b"[2,\"1\",\"Heartbeat\",{}]\n";
    /// let mut output = Vec::new();
    /// ResponderBuilder::new(Config::default())
    ///     .build()
    ///     .run(input, &mut output)
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn run<R, W>(self, input: R, output: W) -> ResponderResult<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        tracing::info!("Responder ready to receive calls");
        run_responder(self.dispatcher, input, output).await
    }

    /// Runs the responder on the process's standard input and output.
    ///
    /// # Errors
    ///
    /// See [`Responder::run`].
    pub async fn run_stdio(self) -> ResponderResult<()> {
        self.run(BufReader::new(io::stdin()), io::stdout()).await
    }
}

pub struct ResponderBuilder {
    config: Config,
    configuration: ConfigurationTable,
}

impl ResponderBuilder {
    /// Creates a builder seeded with the default configuration keys.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            config,
            configuration: ConfigurationTable::default(),
        }
    }

    /// Replaces the whole configuration table.
    #[must_use]
    pub fn with_configuration(mut self, configuration: ConfigurationTable) -> Self {
        self.configuration = configuration;
        self
    }

    /// Adds a configuration key, or overrides the seeded one with the same name.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ocpp_mock::{Config, ConfigurationEntry, ResponderBuilder};
    ///
    /// let responder = ResponderBuilder::new(Config::default())
    ///     .with_configuration_entry(ConfigurationEntry::readonly("NumberOfConnectors", "2"))
    ///     .build();
    /// ```
    #[must_use]
    pub fn with_configuration_entry(mut self, entry: ConfigurationEntry) -> Self {
        self.configuration.insert(entry);
        self
    }

    #[must_use]
    pub fn build(self) -> Responder {
        Responder {
            dispatcher: Dispatcher::new(self.configuration, self.config.transaction_ids),
        }
    }
}
