pub mod category;
pub mod claim_record;
pub mod code_product;
pub mod gallery_item;
pub mod product;
pub mod redemption_code;
pub mod session;
pub mod site_content;
pub mod user;

#[allow(unused_imports)]
pub mod prelude {
    pub use super::category::{self, Entity as Category};
    pub use super::claim_record::{self, Entity as ClaimRecord};
    pub use super::code_product::{self, Entity as CodeProduct};
    pub use super::gallery_item::{self, Entity as GalleryItem};
    pub use super::product::{self, Entity as Product};
    pub use super::redemption_code::{self, Entity as RedemptionCode};
    pub use super::session::{self, Entity as Session};
    pub use super::site_content::{self, Entity as SiteContent};
    pub use super::user::{self, Entity as User};
}
