use registrar_core::AppError;
use registrar_db::{RecordStore, StoreError};
use registrar_models::groups::GroupDto;
use registrar_models::query::{Filter, ListQuery};

/// `(name, code)` of the demo groups.
pub const DEMO_GROUPS: &[(&str, &str)] = &[
    ("Informatics", "INF-101"),
    ("Mathematics", "MATH-201"),
    ("Physics", "PHYS-301"),
];

/// Creates the demo groups, reusing any that already exist by code.
pub(crate) async fn seed_groups(store: &dyn RecordStore) -> Result<Vec<i64>, AppError> {
    println!("📚 Seeding {} groups...", DEMO_GROUPS.len());

    let mut ids = Vec::with_capacity(DEMO_GROUPS.len());
    for &(name, code) in DEMO_GROUPS {
        let dto = GroupDto {
            name: name.to_string(),
            code: code.to_string(),
        };

        let id = match store.create_group(&dto).await {
            Ok(group) => group.id,
            Err(StoreError::Conflict(_)) => existing_group(store, code).await?,
            Err(e) => return Err(e.into()),
        };
        ids.push(id);
    }

    println!("   ✓ Groups ready");
    Ok(ids)
}

async fn existing_group(store: &dyn RecordStore, code: &str) -> Result<i64, AppError> {
    let query = ListQuery {
        filters: Filter::new("code", Some(code)).into_iter().collect(),
        ..Default::default()
    };

    store
        .list_groups(&query)
        .await?
        .items
        .into_iter()
        .find(|group| group.code == code)
        .map(|group| group.id)
        .ok_or_else(|| AppError::internal(anyhow::anyhow!("Group {code} vanished while seeding")))
}
