//! Async wrapper around [`ClubfinSdk`] for use in async runtimes (Tokio, etc.).
//!
//! Runs all SDK operations on a blocking thread pool via
//! [`tokio::task::spawn_blocking`], keeping the async event loop free.
//!
//! # Example
//!
//! ```no_run
//! use clubfin_sdk::AsyncClubfinSdk;
//!
//! #[tokio::main]
//! async fn main() {
//!     let sdk = AsyncClubfinSdk::builder().data_dir("./data").build().await.unwrap();
//!
//!     let answer = sdk
//!         .ask("What was Arsenal's revenue in 2022?", None)
//!         .await
//!         .unwrap();
//!
//!     let table = sdk.run(|s| s.metrics().summary("EUR")).await.unwrap();
//! }
//! ```

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::currency::CurrencyTable;
use crate::error::{ClubfinError, Result};
use crate::models::Answer;
use crate::ClubfinSdk;

// ---------------------------------------------------------------------------
// AsyncClubfinSdkBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing an [`AsyncClubfinSdk`] instance.
#[derive(Default)]
pub struct AsyncClubfinSdkBuilder {
    data_dir: Option<PathBuf>,
    currencies: Option<CurrencyTable>,
}

impl AsyncClubfinSdkBuilder {
    /// Set the directory holding the seed files.
    pub fn data_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.data_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Use an explicit currency table instead of loading one.
    pub fn currency_table(mut self, table: CurrencyTable) -> Self {
        self.currencies = Some(table);
        self
    }

    /// Build the async SDK on the blocking thread pool.
    pub async fn build(self) -> Result<AsyncClubfinSdk> {
        tokio::task::spawn_blocking(move || {
            let mut builder = ClubfinSdk::builder();
            if let Some(dir) = self.data_dir {
                builder = builder.data_dir(dir);
            }
            if let Some(table) = self.currencies {
                builder = builder.currency_table(table);
            }
            Ok(AsyncClubfinSdk::from_sdk(builder.build()?))
        })
        .await
        .map_err(|e| ClubfinError::InvalidArgument(format!("Task join error: {e}")))?
    }
}

// ---------------------------------------------------------------------------
// AsyncClubfinSdk
// ---------------------------------------------------------------------------

/// Async wrapper around [`ClubfinSdk`].
///
/// The underlying SDK is behind a [`Mutex`] since its connection uses
/// `RefCell` internally; calls are serialized.
pub struct AsyncClubfinSdk {
    inner: Arc<Mutex<ClubfinSdk>>,
}

impl AsyncClubfinSdk {
    /// Create a new builder for configuring the async SDK.
    pub fn builder() -> AsyncClubfinSdkBuilder {
        AsyncClubfinSdkBuilder::default()
    }

    /// Wrap an already built SDK.
    pub fn from_sdk(sdk: ClubfinSdk) -> Self {
        Self {
            inner: Arc::new(Mutex::new(sdk)),
        }
    }

    /// Run a sync SDK operation on the blocking thread pool.
    ///
    /// ```no_run
    /// # use clubfin_sdk::AsyncClubfinSdk;
    /// # async fn example() -> clubfin_sdk::Result<()> {
    /// # let sdk = AsyncClubfinSdk::builder().build().await?;
    /// let series = sdk.run(|s| s.metrics().time_series(1)).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn run<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&ClubfinSdk) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let sdk = self.inner.clone();
        tokio::task::spawn_blocking(move || {
            let guard = sdk
                .lock()
                .map_err(|_| ClubfinError::InvalidArgument("SDK lock poisoned".into()))?;
            f(&guard)
        })
        .await
        .map_err(|e| ClubfinError::InvalidArgument(format!("Task join error: {e}")))?
    }

    /// Answer a revenue question asynchronously.
    pub async fn ask(&self, question: &str, currency: Option<&str>) -> Result<Answer> {
        let question = question.to_string();
        let currency = currency.map(str::to_string);
        self.run(move |s| s.ask(&question, currency.as_deref()))
            .await
    }
}
