#![allow(dead_code)]
#![allow(clippy::needless_return, clippy::too_many_arguments, clippy::collapsible_if,
         clippy::field_reassign_with_default, clippy::manual_range_contains,
         clippy::identity_op, clippy::float_cmp, clippy::needless_range_loop)]

// Client-side physgun beam effect subsystem.
pub mod client;
pub mod cl_beam;
pub mod cl_ents;
pub mod cl_fx;
pub mod cl_input;
pub mod cl_parse;
pub mod cl_scene;
pub mod cl_view;
