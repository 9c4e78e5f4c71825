use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "premium_sites")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub token: String,
    #[sea_orm(column_type = "Text")]
    pub site_id: String,
    pub is_premium: bool,
    pub is_active: bool,
    pub views: i64,
    pub plan: String,
    pub payment_id: String,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_cpf: String,
    #[sea_orm(column_type = "Text")]
    pub customer_plan: String,
    #[sea_orm(column_type = "Text")]
    pub customer_payment_id: String,
    pub payment_date: DateTime,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub start_date: DateTime,
    pub theme: String,
    pub person1: String,
    pub person2: String,
    #[sea_orm(column_type = "Text")]
    pub photos: String,
    #[sea_orm(column_type = "Text")]
    pub banner: String,
    pub emoji: String,
    pub background_color: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub spotify_track: Option<String>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
    pub last_viewed_at: Option<DateTime>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
