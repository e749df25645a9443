//! # Death Timer Core Library
//!
//! This library provides the core logic for the death timer: a one-time
//! life expectancy estimate and a live countdown to it. It follows a
//! CLI-first layout where every operation is available through the
//! standalone `deathtimer` binary, which is a thin layer over this crate.
//!
//! ## Architecture
//!
//! - **Estimator**: country base years plus fixed per-answer adjustments,
//!   added as calendar years to the birth date
//! - **Countdown**: a caller-driven state machine plus a tokio ticker that
//!   recomputes the remaining time once per second
//! - **Progress**: percentage lived, day/week/month counts and the
//!   month dot grid
//! - **Storage**: SQLite profile storage and TOML-based configuration
//!
//! ## Key Components
//!
//! - [`QuizSession`]: Onboarding quiz producing the [`Profile`]
//! - [`CountdownEngine`] / [`CountdownTimer`]: Countdown state and ticking
//! - [`LifeProgress`]: Lifespan progress report
//! - [`Database`]: Profile persistence
//! - [`Config`]: Application configuration management

pub mod calendar;
pub mod clock;
pub mod countdown;
pub mod error;
pub mod estimator;
pub mod events;
pub mod feedback;
pub mod profile;
pub mod progress;
pub mod quiz;
pub mod storage;
pub mod widget;

pub use calendar::CalendarDelta;
pub use clock::{Clock, FixedClock, SystemClock};
pub use countdown::{CountdownEngine, CountdownReading, CountdownTimer, DisplayMode};
pub use error::{ConfigError, CoreError, DatabaseError, ProfileError, QuizError};
pub use estimator::{estimate, Estimate, LifestyleAnswers, LifestyleQuestion};
pub use events::Event;
pub use feedback::{Feedback, ImpactStyle, NoopFeedback, NotificationKind, TracingFeedback};
pub use profile::{Profile, QuizResponse};
pub use progress::{DotGrid, LifeProgress, LifeStatistics};
pub use quiz::{QuizQuestion, QuizSession};
pub use storage::{Config, Database};
pub use widget::{WidgetContent, WidgetFamily};
