use sea_orm_migration::prelude::*;
use sea_orm_migration::schema::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PremiumSites::Table)
                    .if_not_exists()
                    .col(string_len(PremiumSites::Token, 64).primary_key())
                    .col(text(PremiumSites::SiteId))
                    .col(boolean(PremiumSites::IsPremium).default(true))
                    .col(boolean(PremiumSites::IsActive).default(true))
                    .col(
                        big_integer(PremiumSites::Views)
                            .default(0)
                            .check(Expr::col(PremiumSites::Views).gte(0)),
                    )
                    // Plan enum is represented in app code: 'premium' | 'lifetime'.
                    .col(string_len(PremiumSites::Plan, 16))
                    // Indexed columns stay bounded; the API rejects longer values.
                    .col(string_len(PremiumSites::PaymentId, 64))
                    .col(string_len(PremiumSites::CustomerName, 100))
                    .col(string_len(PremiumSites::CustomerEmail, 255))
                    // Stored as XXX.XXX.XXX-XX.
                    .col(string_len(PremiumSites::CustomerCpf, 14))
                    .col(text(PremiumSites::CustomerPlan))
                    .col(text(PremiumSites::CustomerPaymentId))
                    .col(timestamp(PremiumSites::PaymentDate))
                    .col(string_len(PremiumSites::Title, 200))
                    .col(text(PremiumSites::Description))
                    .col(timestamp(PremiumSites::StartDate))
                    .col(string_len(PremiumSites::Theme, 16).default("romantic"))
                    .col(string_len(PremiumSites::Person1, 50))
                    .col(string_len(PremiumSites::Person2, 50).default(""))
                    // JSON array of hosted image URLs.
                    .col(text(PremiumSites::Photos))
                    .col(text(PremiumSites::Banner))
                    .col(string_len(PremiumSites::Emoji, 64))
                    .col(string_len(PremiumSites::BackgroundColor, 7).default("#ffffff"))
                    // JSON object, NULL when no track was picked.
                    .col(text_null(PremiumSites::SpotifyTrack))
                    .col(timestamp(PremiumSites::CreatedAt).default(Expr::current_timestamp()))
                    .col(timestamp(PremiumSites::UpdatedAt).default(Expr::current_timestamp()))
                    .col(timestamp_null(PremiumSites::LastViewedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_premium_sites_customer_email")
                    .table(PremiumSites::Table)
                    .col(PremiumSites::CustomerEmail)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_premium_sites_payment_id")
                    .table(PremiumSites::Table)
                    .col(PremiumSites::PaymentId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_premium_sites_created_at")
                    .table(PremiumSites::Table)
                    .col(PremiumSites::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PremiumSites::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum PremiumSites {
    Table,
    Token,
    SiteId,
    IsPremium,
    IsActive,
    Views,
    Plan,
    PaymentId,
    CustomerName,
    CustomerEmail,
    CustomerCpf,
    CustomerPlan,
    CustomerPaymentId,
    PaymentDate,
    Title,
    Description,
    StartDate,
    Theme,
    Person1,
    Person2,
    Photos,
    Banner,
    Emoji,
    BackgroundColor,
    SpotifyTrack,
    CreatedAt,
    UpdatedAt,
    LastViewedAt,
}
