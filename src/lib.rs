//! Story Assistant - Conversational user story authoring
//!
//! This crate turns a chat with a Product Owner into a user story, its
//! acceptance criteria and a suggested task breakdown. Each message runs a
//! fixed sequence of three agents (PO-Expert, Reviewer, TaskOverview) over
//! the session's history; the structured result is then recovered from the
//! conversation text.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
