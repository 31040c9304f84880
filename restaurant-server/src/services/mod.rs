//! 服务层 - 业务编排
//!
//! # 服务列表
//!
//! - [`AccountService`] - 注册 / 登录 (密码哈希 + 令牌签发)
//! - [`OrderLifecycle`] - 订单与订单项的创建流程
//! - [`CatalogService`] - 菜单、菜品、餐桌、发票的创建与更新规则

pub mod account;
pub mod catalog;
pub mod order_lifecycle;

pub use account::AccountService;
pub use catalog::CatalogService;
pub use order_lifecycle::OrderLifecycle;
