// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod accrual;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod fund;
pub mod ledger;
pub mod models;
pub mod proration;
pub mod utils;
pub mod window;
