//! External service clients used by the workflow.

pub mod payment;
pub mod razorpay;
pub mod shipping;
pub mod shiprocket;
