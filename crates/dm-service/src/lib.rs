//! # dm-service
//!
//! Application layer over the direct-message read path: history paging with
//! next-cursor computation and send-rate snapshots for throttling callers.

pub mod services;

pub use services::{
    MessageHistoryService, MessagePage, SendRateCounts, SendRateService, ServiceContext,
    ServiceContextBuilder, ServiceError, ServiceResult,
};
