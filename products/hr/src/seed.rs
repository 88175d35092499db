//! Demo organisation for local development.

use chrono::{Duration, Utc};
use entity::employee::City;
use entity::position::PositionCode;
use entity::specialization::SpecializationCode;
use entity::{employee, employee_draft, news_article};
use sea_orm::{DatabaseConnection, TransactionTrait};
use tracing::info;

use crate::HrResult;
use crate::catalog::ensure_catalog;
use crate::drafts::{DraftInput, create_draft};
use crate::employees::{NewEmployee, provision_employee};
use crate::news::{NewArticle, create_article};
use crate::users::{NewUser, create_user, find_user_by_username};

const LEAD_USERNAME: &str = "y.volkov";

#[derive(Debug, Clone)]
pub struct SeededHr {
    pub employees: Vec<employee::Model>,
    pub drafts: Vec<employee_draft::Model>,
    pub articles: Vec<news_article::Model>,
}

impl SeededHr {
    pub fn employee_named(&self, full_name: &str) -> Option<&employee::Model> {
        self.employees.iter().find(|e| e.full_name == full_name)
    }
}

/// Returns `None` when the demo data is already present. Everything is
/// written in one transaction, so a failed run leaves nothing behind.
pub async fn seed_demo(db: &DatabaseConnection) -> HrResult<Option<SeededHr>> {
    ensure_catalog(db).await?;
    let txn = db.begin().await?;
    if find_user_by_username(&txn, LEAD_USERNAME).await?.is_some() {
        info!("demo data already present");
        return Ok(None);
    }

    let lead_user = create_user(&txn, NewUser::staff(LEAD_USERNAME)).await?;
    let lead = provision_employee(
        &txn,
        NewEmployee {
            position: Some(PositionCode::Manager),
            specializations: vec![SpecializationCode::Python, SpecializationCode::Go],
            telegram_nick: "@volkov_y".into(),
            about: "Руководитель группы бэкенда".into(),
            ..NewEmployee::new(lead_user.id, "Волков Ярослав Владимирович", City::Moscow)
        },
    )
    .await?;

    let mut employees = vec![lead.clone()];
    let team = [
        (
            "a.smirnova",
            "Смирнова Анна Сергеевна",
            PositionCode::SeniorDev,
            City::Spb,
            SpecializationCode::DataEngineer,
        ),
        (
            "i.petrov",
            "Петров Илья Андреевич",
            PositionCode::MiddleDev,
            City::Moscow,
            SpecializationCode::Devops,
        ),
        (
            "m.dubois",
            "Marie Dubois",
            PositionCode::JuniorDev,
            City::Paris,
            SpecializationCode::Python,
        ),
    ];
    for (username, full_name, position, city, specialization) in team {
        let user = create_user(&txn, NewUser::staff(username)).await?;
        let mut input = NewEmployee::new(user.id, full_name, city);
        input.position = Some(position);
        input.specializations = vec![specialization];
        input.manager_id = Some(lead.id);
        input.created_by_id = Some(lead.id);
        if city == City::Paris {
            input.workplace_country = Some("France".into());
        }
        employees.push(provision_employee(&txn, input).await?);
    }

    let mut drafts = Vec::new();
    if let Some(junior) = employees.iter().find(|e| e.workplace_city == City::Paris) {
        let draft = create_draft(
            &txn,
            junior.id,
            DraftInput {
                position: Some(PositionCode::MiddleDev),
                telegram_nick: Some("@marie_d".into()),
                ..DraftInput::default()
            },
        )
        .await?;
        drafts.push(draft);
    }

    let now = Utc::now();
    let mut articles = Vec::new();
    for (offset, title, url) in [
        (1, "Открыт офис в Париже", "https://intranet.example/news/paris-office"),
        (3, "Итоги квартала", "https://intranet.example/news/q-results"),
    ] {
        let article = create_article(
            &txn,
            NewArticle {
                author: "HR".into(),
                title: title.into(),
                content: format!("{title}. Подробности у вашего руководителя."),
                published_at: (now - Duration::days(offset)).into(),
                source_url: url.into(),
            },
        )
        .await?;
        articles.push(article);
    }

    txn.commit().await?;
    info!(
        employees = employees.len(),
        drafts = drafts.len(),
        articles = articles.len(),
        "demo data seeded"
    );
    Ok(Some(SeededHr {
        employees,
        drafts,
        articles,
    }))
}
