pub mod premium_site;
