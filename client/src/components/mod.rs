//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render app chrome (nav bar, notices) and catalogue building
//! blocks shared by several pages. They receive state handles as props.

pub mod comment_list;
pub mod course_card;
pub mod nav_bar;
pub mod redirect_listener;
pub mod toaster;
