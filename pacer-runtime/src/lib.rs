// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Runtime abstraction for pacer.
//!
//! - [`timer::Timer`] - sleep futures and a monotonic clock for one runtime
//! - [`scheduler::Scheduler`] - "run this callback after a delay, unless cancelled first"
//! - [`runtime::Runtime`] - ties a runtime's timer and default scheduler together
//!
//! Enable one of `runtime-tokio` (default) or `runtime-smol`.

pub mod impls;
pub mod runtime;
pub mod scheduler;
pub mod timer;
