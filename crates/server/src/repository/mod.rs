mod premium_site_repository;

pub use premium_site_repository::{
    CustomerRecord, ListFilter, NewPremiumSite, Page, PremiumSiteRecord, PremiumSiteRepository,
    SeaOrmPremiumSiteRepository, SiteContentRecord, UpsertOutcome,
};
