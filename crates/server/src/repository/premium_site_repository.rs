use crate::entity::premium_site;
use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, TransactionTrait,
};
use vibraze_api_types::SpotifyTrack;
use vibraze_core::domain::{BannerUrl, Cpf, Email, HexColor, Plan, SiteToken, Theme};

#[derive(Debug, Clone, PartialEq)]
pub struct CustomerRecord {
    pub name: String,
    pub email: Email,
    pub cpf: Cpf,
    pub plan: String,
    pub payment_id: String,
    pub payment_date: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SiteContentRecord {
    pub title: String,
    pub description: String,
    pub start_date: NaiveDateTime,
    pub theme: Theme,
    pub person1: String,
    pub person2: String,
    pub photos: Vec<String>,
    pub banner: BannerUrl,
    pub emoji: String,
    pub background_color: HexColor,
    pub spotify_track: Option<SpotifyTrack>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PremiumSiteRecord {
    pub token: SiteToken,
    pub site_id: String,
    pub is_premium: bool,
    pub is_active: bool,
    pub views: i64,
    pub plan: Plan,
    pub payment_id: String,
    pub customer: CustomerRecord,
    pub content: SiteContentRecord,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub last_viewed_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewPremiumSite {
    pub token: SiteToken,
    pub site_id: String,
    pub is_premium: bool,
    pub is_active: bool,
    pub plan: Plan,
    pub payment_id: String,
    pub customer: CustomerRecord,
    pub content: SiteContentRecord,
}

#[derive(Debug, Clone)]
pub struct UpsertOutcome {
    pub record: PremiumSiteRecord,
    pub created: bool,
}

#[derive(Debug, Clone, Default)]
pub struct ListFilter {
    pub email: Option<Email>,
    pub limit: u64,
    pub skip: u64,
}

#[derive(Debug, Clone)]
pub struct Page {
    pub records: Vec<PremiumSiteRecord>,
    pub total: u64,
}

#[async_trait]
pub trait PremiumSiteRepository: Send + Sync {
    /// Inserts a new site or overwrites the customizable fields of an existing one.
    /// Views and creation time survive an overwrite.
    async fn upsert(&self, site: NewPremiumSite) -> Result<UpsertOutcome>;
    async fn find_by_token(&self, token: &SiteToken) -> Result<Option<PremiumSiteRecord>>;
    /// Counts one view and returns the site as it is after the increment.
    async fn record_view(&self, token: &SiteToken) -> Result<Option<PremiumSiteRecord>>;
    async fn list(&self, filter: ListFilter) -> Result<Page>;
}

#[derive(Clone)]
pub struct SeaOrmPremiumSiteRepository {
    db: DatabaseConnection,
}

impl SeaOrmPremiumSiteRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn apply(active_model: &mut premium_site::ActiveModel, site: &NewPremiumSite) -> Result<()> {
        let photos = serde_json::to_string(&site.content.photos)
            .context("failed to encode premium_sites.photos")?;
        let spotify_track = site
            .content
            .spotify_track
            .as_ref()
            .map(serde_json::to_string)
            .transpose()
            .context("failed to encode premium_sites.spotify_track")?;

        active_model.site_id = Set(site.site_id.clone());
        active_model.is_premium = Set(site.is_premium);
        active_model.is_active = Set(site.is_active);
        active_model.plan = Set(site.plan.as_str().to_string());
        active_model.payment_id = Set(site.payment_id.clone());
        active_model.customer_name = Set(site.customer.name.clone());
        active_model.customer_email = Set(site.customer.email.as_str().to_string());
        active_model.customer_cpf = Set(site.customer.cpf.formatted());
        active_model.customer_plan = Set(site.customer.plan.clone());
        active_model.customer_payment_id = Set(site.customer.payment_id.clone());
        active_model.payment_date = Set(site.customer.payment_date);
        active_model.title = Set(site.content.title.clone());
        active_model.description = Set(site.content.description.clone());
        active_model.start_date = Set(site.content.start_date);
        active_model.theme = Set(site.content.theme.as_str().to_string());
        active_model.person1 = Set(site.content.person1.clone());
        active_model.person2 = Set(site.content.person2.clone());
        active_model.photos = Set(photos);
        active_model.banner = Set(site.content.banner.as_str().to_string());
        active_model.emoji = Set(site.content.emoji.clone());
        active_model.background_color = Set(site.content.background_color.as_str().to_string());
        active_model.spotify_track = Set(spotify_track);

        Ok(())
    }

    fn map_model(model: premium_site::Model) -> Result<PremiumSiteRecord> {
        let token = SiteToken::parse(&model.token).map_err(|e| {
            anyhow!("invalid premium_sites.token '{}' from database: {e}", model.token)
        })?;
        let plan = model
            .plan
            .parse::<Plan>()
            .map_err(|e| anyhow!("invalid premium_sites.plan from database: {e}"))?;
        let email = Email::parse(&model.customer_email)
            .map_err(|e| anyhow!("invalid premium_sites.customer_email from database: {e}"))?;
        let cpf = Cpf::parse(&model.customer_cpf)
            .map_err(|e| anyhow!("invalid premium_sites.customer_cpf from database: {e}"))?;
        let theme = model
            .theme
            .parse::<Theme>()
            .map_err(|e| anyhow!("invalid premium_sites.theme from database: {e}"))?;
        let banner = BannerUrl::parse(&model.banner)
            .map_err(|e| anyhow!("invalid premium_sites.banner from database: {e}"))?;
        let background_color = HexColor::parse(&model.background_color)
            .map_err(|e| anyhow!("invalid premium_sites.background_color from database: {e}"))?;
        let photos: Vec<String> = serde_json::from_str(&model.photos)
            .context("invalid premium_sites.photos json from database")?;
        let spotify_track = model
            .spotify_track
            .as_deref()
            .map(serde_json::from_str::<SpotifyTrack>)
            .transpose()
            .context("invalid premium_sites.spotify_track json from database")?;

        Ok(PremiumSiteRecord {
            token,
            site_id: model.site_id,
            is_premium: model.is_premium,
            is_active: model.is_active,
            views: model.views,
            plan,
            payment_id: model.payment_id,
            customer: CustomerRecord {
                name: model.customer_name,
                email,
                cpf,
                plan: model.customer_plan,
                payment_id: model.customer_payment_id,
                payment_date: model.payment_date,
            },
            content: SiteContentRecord {
                title: model.title,
                description: model.description,
                start_date: model.start_date,
                theme,
                person1: model.person1,
                person2: model.person2,
                photos,
                banner,
                emoji: model.emoji,
                background_color,
                spotify_track,
            },
            created_at: model.created_at,
            updated_at: model.updated_at,
            last_viewed_at: model.last_viewed_at,
        })
    }
}

#[async_trait]
impl PremiumSiteRepository for SeaOrmPremiumSiteRepository {
    async fn upsert(&self, site: NewPremiumSite) -> Result<UpsertOutcome> {
        let now = Utc::now().naive_utc();
        let txn = self.db.begin().await?;

        let existing = premium_site::Entity::find_by_id(site.token.as_str())
            .one(&txn)
            .await?;

        let (model, created) = match existing {
            Some(model) => {
                let mut active_model: premium_site::ActiveModel = model.into();
                Self::apply(&mut active_model, &site)?;
                active_model.updated_at = Set(now);
                (active_model.update(&txn).await?, false)
            }
            None => {
                let mut active_model = premium_site::ActiveModel {
                    token: Set(site.token.as_str().to_string()),
                    views: Set(0),
                    created_at: Set(now),
                    updated_at: Set(now),
                    last_viewed_at: Set(None),
                    ..Default::default()
                };
                Self::apply(&mut active_model, &site)?;
                (active_model.insert(&txn).await?, true)
            }
        };

        txn.commit().await?;

        Ok(UpsertOutcome {
            record: Self::map_model(model)?,
            created,
        })
    }

    async fn find_by_token(&self, token: &SiteToken) -> Result<Option<PremiumSiteRecord>> {
        let model = premium_site::Entity::find_by_id(token.as_str())
            .one(&self.db)
            .await?;

        model.map(Self::map_model).transpose()
    }

    async fn record_view(&self, token: &SiteToken) -> Result<Option<PremiumSiteRecord>> {
        let now = Utc::now().naive_utc();
        let txn = self.db.begin().await?;

        let result = premium_site::Entity::update_many()
            .col_expr(
                premium_site::Column::Views,
                Expr::col(premium_site::Column::Views).add(1),
            )
            .col_expr(premium_site::Column::LastViewedAt, Expr::value(now))
            .col_expr(premium_site::Column::UpdatedAt, Expr::value(now))
            .filter(premium_site::Column::Token.eq(token.as_str()))
            .exec(&txn)
            .await?;

        if result.rows_affected == 0 {
            txn.rollback().await?;
            return Ok(None);
        }

        let model = premium_site::Entity::find_by_id(token.as_str())
            .one(&txn)
            .await?;
        txn.commit().await?;

        model.map(Self::map_model).transpose()
    }

    async fn list(&self, filter: ListFilter) -> Result<Page> {
        let mut query = premium_site::Entity::find();
        if let Some(email) = &filter.email {
            query = query.filter(premium_site::Column::CustomerEmail.eq(email.as_str()));
        }

        let total = query.clone().count(&self.db).await?;
        let models = query
            .order_by_desc(premium_site::Column::CreatedAt)
            .order_by_asc(premium_site::Column::Token)
            .offset(filter.skip)
            .limit(filter.limit)
            .all(&self.db)
            .await?;

        let records = models
            .into_iter()
            .map(Self::map_model)
            .collect::<Result<Vec<_>>>()?;

        Ok(Page { records, total })
    }
}
