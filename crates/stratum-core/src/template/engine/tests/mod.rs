//! Tests for the template engine

use super::*;

mod helpers;

mod render_basic;

mod errors;
