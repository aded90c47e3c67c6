//! Shared Types

pub mod attachment;
pub mod blog;
pub mod business;
pub mod compliance;
pub mod customer;
pub mod faq;
pub mod id;
pub mod inquiry;
pub mod microfinance;
pub mod permission;
pub mod portfolio;
pub mod role;
pub mod session;
pub mod subaccount;
pub mod transaction;

pub use attachment::Attachment;
pub use blog::{slugify, BlogPost, PostForm, PostStatus};
pub use business::{Business, TenantProfile};
pub use compliance::{
    Compliance, Currency, CurrencyForm, Industry, IndustryForm, MerchantBusiness, MerchantSummary,
    RegionalState, RegionalStateForm, StaffSize, StaffSizeForm, SubCity, SubCityForm,
    TransactionVolume,
};
pub use customer::Customer;
pub use faq::FaqItem;
pub use inquiry::{ContactInquiry, InquiryStatus};
pub use microfinance::{Microfinance, MicrofinanceForm, MicrofinanceStatus};
pub use permission::{normalize_permission, Permission, PermissionSet};
pub use portfolio::{AssetForm, AssetType, PortfolioAsset};
pub use role::{permission_catalogue, GroupState, PermissionSelection, RoleDefinition};
pub use session::{AccessToken, Role, Session};
pub use subaccount::{Bank, Subaccount, SubaccountForm, TransferForm};
pub use transaction::{Transaction, TransactionTenant};
