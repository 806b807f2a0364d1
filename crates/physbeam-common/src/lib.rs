#![allow(dead_code)]
#![allow(clippy::needless_return, clippy::too_many_arguments, clippy::collapsible_if,
         clippy::field_reassign_with_default, clippy::manual_range_contains,
         clippy::identity_op, clippy::float_cmp, clippy::needless_range_loop)]

pub mod q_shared;
pub mod qcommon;
pub mod cvar;
pub mod common;
