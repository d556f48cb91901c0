use crate::models::{DbArticle, DbService, DbSiteContent, DbTeamMember};
use async_trait::async_trait;
use cabinet_core::{
    gateway::ContentGateway,
    models::content::{
        ArticleFields, ArticleKind, Event, NewsItem, Service, ServiceFields, SiteContent,
        TeamMember, TeamMemberFields,
    },
};
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

// Site content

pub async fn get_site_content(pool: &Pool<Postgres>) -> Result<SiteContent> {
    let rows = sqlx::query_as::<_, DbSiteContent>(
        r#"
        SELECT section, key_name, value
        FROM site_content
        "#,
    )
    .fetch_all(pool)
    .await?;

    let mut content = SiteContent::new();
    for row in rows {
        content
            .entry(row.section)
            .or_default()
            .insert(row.key_name, row.value);
    }

    Ok(content)
}

/// Upserts every `(section, key, value)` entry in a single transaction.
pub async fn upsert_site_content(
    pool: &Pool<Postgres>,
    entries: &[(String, String, String)],
) -> Result<()> {
    let now = crate::now();
    let mut tx = pool.begin().await?;

    for (section, key, value) in entries {
        sqlx::query(
            r#"
            INSERT INTO site_content (section, key_name, value, updated_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (section, key_name)
            DO UPDATE SET value = EXCLUDED.value, updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(section)
        .bind(key)
        .bind(value)
        .bind(now)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    Ok(())
}

// Services

pub async fn list_services(pool: &Pool<Postgres>) -> Result<Vec<DbService>> {
    let services = sqlx::query_as::<_, DbService>(
        r#"
        SELECT id, title, description, icon, color, detailed_content,
               order_position, is_active, created_at, updated_at
        FROM services
        ORDER BY order_position
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(services)
}

pub async fn create_service(pool: &Pool<Postgres>, fields: &ServiceFields) -> Result<DbService> {
    let id = Uuid::new_v4();
    let now = crate::now();

    let service = sqlx::query_as::<_, DbService>(
        r#"
        INSERT INTO services (id, title, description, icon, color, detailed_content,
                              order_position, is_active, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6,
                (SELECT COALESCE(MAX(order_position), 0) + 1 FROM services), TRUE, $7, $7)
        RETURNING id, title, description, icon, color, detailed_content,
                  order_position, is_active, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(&fields.title)
    .bind(&fields.description)
    .bind(&fields.icon)
    .bind(&fields.color)
    .bind(&fields.detailed_content)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(service)
}

pub async fn update_service(
    pool: &Pool<Postgres>,
    id: Uuid,
    fields: &ServiceFields,
    is_active: bool,
) -> Result<u64> {
    let result = sqlx::query(
        r#"
        UPDATE services
        SET title = $2, description = $3, icon = $4, color = $5,
            detailed_content = $6, is_active = $7, updated_at = $8
        WHERE id = $1
        "#,
    )
    .bind(id)
    .bind(&fields.title)
    .bind(&fields.description)
    .bind(&fields.icon)
    .bind(&fields.color)
    .bind(&fields.detailed_content)
    .bind(is_active)
    .bind(crate::now())
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}

pub async fn delete_service(pool: &Pool<Postgres>, id: Uuid) -> Result<u64> {
    let result = sqlx::query("DELETE FROM services WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

// Team members

pub async fn list_team_members(pool: &Pool<Postgres>) -> Result<Vec<DbTeamMember>> {
    let members = sqlx::query_as::<_, DbTeamMember>(
        r#"
        SELECT id, name, position, description, image_path,
               order_position, is_active, created_at, updated_at
        FROM team_members
        ORDER BY order_position
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(members)
}

pub async fn create_team_member(
    pool: &Pool<Postgres>,
    fields: &TeamMemberFields,
    image_path: Option<&str>,
) -> Result<DbTeamMember> {
    let id = Uuid::new_v4();
    let now = crate::now();

    let member = sqlx::query_as::<_, DbTeamMember>(
        r#"
        INSERT INTO team_members (id, name, position, description, image_path,
                                  order_position, is_active, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5,
                (SELECT COALESCE(MAX(order_position), 0) + 1 FROM team_members), TRUE, $6, $6)
        RETURNING id, name, position, description, image_path,
                  order_position, is_active, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(&fields.name)
    .bind(&fields.position)
    .bind(&fields.description)
    .bind(image_path)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(member)
}

/// Updates a team member. The stored image is kept when `image_path` is `None`.
pub async fn update_team_member(
    pool: &Pool<Postgres>,
    id: Uuid,
    fields: &TeamMemberFields,
    image_path: Option<&str>,
    is_active: bool,
) -> Result<u64> {
    let result = sqlx::query(
        r#"
        UPDATE team_members
        SET name = $2, position = $3, description = $4,
            image_path = COALESCE($5, image_path), is_active = $6, updated_at = $7
        WHERE id = $1
        "#,
    )
    .bind(id)
    .bind(&fields.name)
    .bind(&fields.position)
    .bind(&fields.description)
    .bind(image_path)
    .bind(is_active)
    .bind(crate::now())
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}

/// Deletes a team member. Returns `None` when no row matched, otherwise the
/// image path the row pointed to.
pub async fn delete_team_member(
    pool: &Pool<Postgres>,
    id: Uuid,
) -> Result<Option<Option<String>>> {
    let deleted = sqlx::query_scalar::<_, Option<String>>(
        r#"
        DELETE FROM team_members
        WHERE id = $1
        RETURNING image_path
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(deleted)
}

// News and events

fn table(kind: ArticleKind) -> &'static str {
    kind.as_str()
}

fn date_column(kind: ArticleKind) -> &'static str {
    match kind {
        ArticleKind::News => "publish_date",
        ArticleKind::Events => "event_date",
    }
}

fn returning(kind: ArticleKind) -> String {
    format!(
        "id, title, content, image_path, {} AS article_date, order_position, is_active, created_at, updated_at",
        date_column(kind)
    )
}

pub async fn list_articles(pool: &Pool<Postgres>, kind: ArticleKind) -> Result<Vec<DbArticle>> {
    let sql = format!(
        "SELECT {} FROM {} ORDER BY {} DESC",
        returning(kind),
        table(kind),
        date_column(kind)
    );

    let articles = sqlx::query_as::<_, DbArticle>(&sql).fetch_all(pool).await?;

    Ok(articles)
}

pub async fn create_article(
    pool: &Pool<Postgres>,
    kind: ArticleKind,
    fields: &ArticleFields,
    image_path: Option<&str>,
) -> Result<DbArticle> {
    let sql = format!(
        r#"
        INSERT INTO {table} (id, title, content, image_path, {date},
                             order_position, is_active, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5,
                (SELECT COALESCE(MAX(order_position), 0) + 1 FROM {table}), TRUE, $6, $6)
        RETURNING {returning}
        "#,
        table = table(kind),
        date = date_column(kind),
        returning = returning(kind),
    );

    let article = sqlx::query_as::<_, DbArticle>(&sql)
        .bind(Uuid::new_v4())
        .bind(&fields.title)
        .bind(&fields.content)
        .bind(image_path)
        .bind(fields.date.unwrap_or_else(crate::now))
        .bind(crate::now())
        .fetch_one(pool)
        .await?;

    Ok(article)
}

/// Updates a news item or event. The stored image and date are kept when
/// `image_path` or `fields.date` is `None`.
pub async fn update_article(
    pool: &Pool<Postgres>,
    kind: ArticleKind,
    id: Uuid,
    fields: &ArticleFields,
    image_path: Option<&str>,
    is_active: bool,
) -> Result<u64> {
    let sql = format!(
        r#"
        UPDATE {table}
        SET title = $2, content = $3, image_path = COALESCE($4, image_path),
            {date} = COALESCE($5, {date}), is_active = $6, updated_at = $7
        WHERE id = $1
        "#,
        table = table(kind),
        date = date_column(kind),
    );

    let result = sqlx::query(&sql)
        .bind(id)
        .bind(&fields.title)
        .bind(&fields.content)
        .bind(image_path)
        .bind(fields.date)
        .bind(is_active)
        .bind(crate::now())
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

/// Deletes a news item or event. Returns `None` when no row matched,
/// otherwise the image path the row pointed to.
pub async fn delete_article(
    pool: &Pool<Postgres>,
    kind: ArticleKind,
    id: Uuid,
) -> Result<Option<Option<String>>> {
    let sql = format!(
        "DELETE FROM {} WHERE id = $1 RETURNING image_path",
        table(kind)
    );

    let deleted = sqlx::query_scalar::<_, Option<String>>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(deleted)
}

/// [`ContentGateway`] backed by the content tables.
#[derive(Debug, Clone)]
pub struct PgContentGateway {
    pool: Pool<Postgres>,
}

impl PgContentGateway {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ContentGateway for PgContentGateway {
    async fn site_content(&self) -> Result<SiteContent> {
        get_site_content(&self.pool).await
    }

    async fn save_site_content(&self, entries: Vec<(String, String, String)>) -> Result<()> {
        upsert_site_content(&self.pool, &entries).await
    }

    async fn list_services(&self) -> Result<Vec<Service>> {
        let services = list_services(&self.pool).await?;
        Ok(services.into_iter().map(Service::from).collect())
    }

    async fn create_service(&self, fields: &ServiceFields) -> Result<Service> {
        Ok(create_service(&self.pool, fields).await?.into())
    }

    async fn update_service(&self, id: Uuid, fields: &ServiceFields, is_active: bool) -> Result<u64> {
        update_service(&self.pool, id, fields, is_active).await
    }

    async fn delete_service(&self, id: Uuid) -> Result<u64> {
        delete_service(&self.pool, id).await
    }

    async fn list_team_members(&self) -> Result<Vec<TeamMember>> {
        let members = list_team_members(&self.pool).await?;
        Ok(members.into_iter().map(TeamMember::from).collect())
    }

    async fn create_team_member(
        &self,
        fields: &TeamMemberFields,
        image_path: Option<String>,
    ) -> Result<TeamMember> {
        Ok(create_team_member(&self.pool, fields, image_path.as_deref())
            .await?
            .into())
    }

    async fn update_team_member(
        &self,
        id: Uuid,
        fields: &TeamMemberFields,
        image_path: Option<String>,
        is_active: bool,
    ) -> Result<u64> {
        update_team_member(&self.pool, id, fields, image_path.as_deref(), is_active).await
    }

    async fn delete_team_member(&self, id: Uuid) -> Result<Option<Option<String>>> {
        delete_team_member(&self.pool, id).await
    }

    async fn list_news(&self) -> Result<Vec<NewsItem>> {
        let news = list_articles(&self.pool, ArticleKind::News).await?;
        Ok(news.into_iter().map(NewsItem::from).collect())
    }

    async fn list_events(&self) -> Result<Vec<Event>> {
        let events = list_articles(&self.pool, ArticleKind::Events).await?;
        Ok(events.into_iter().map(Event::from).collect())
    }

    async fn create_article(
        &self,
        kind: ArticleKind,
        fields: &ArticleFields,
        image_path: Option<String>,
    ) -> Result<Uuid> {
        let article = create_article(&self.pool, kind, fields, image_path.as_deref()).await?;
        Ok(article.id)
    }

    async fn update_article(
        &self,
        kind: ArticleKind,
        id: Uuid,
        fields: &ArticleFields,
        image_path: Option<String>,
        is_active: bool,
    ) -> Result<u64> {
        update_article(&self.pool, kind, id, fields, image_path.as_deref(), is_active).await
    }

    async fn delete_article(&self, kind: ArticleKind, id: Uuid) -> Result<Option<Option<String>>> {
        delete_article(&self.pool, kind, id).await
    }
}
