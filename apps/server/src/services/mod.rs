// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Service modules for APS access and memoization.

pub mod aps;
pub mod derived;
pub mod memo;

pub use aps::ApsClient;
pub use memo::MemoCache;
