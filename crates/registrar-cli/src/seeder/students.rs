use std::time::Instant;

use fake::Fake;
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::{FirstName, LastName};
use registrar_core::AppError;
use registrar_db::RecordStore;
use registrar_models::students::CreateStudentDto;

/// Generates a student, assigning groups round-robin.
fn generate_student(index: usize, groups: &[i64]) -> CreateStudentDto {
    let group_id = (!groups.is_empty()).then(|| groups[index % groups.len()]);

    CreateStudentDto {
        name: FirstName().fake(),
        surname: LastName().fake(),
        email: Some(SafeEmail().fake()),
        group_id,
    }
}

pub(crate) async fn seed_students(
    store: &dyn RecordStore,
    groups: &[i64],
    count: usize,
) -> Result<usize, AppError> {
    if count == 0 {
        return Ok(0);
    }

    let start_time = Instant::now();
    println!("👩‍🎓 Seeding {count} students...");

    for index in 0..count {
        store.create_student(&generate_student(index, groups)).await?;
    }

    println!("   ✓ Inserted {count} students in {:?}", start_time.elapsed());
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_student_round_robin() {
        let groups = [10, 20];
        assert_eq!(generate_student(0, &groups).group_id, Some(10));
        assert_eq!(generate_student(1, &groups).group_id, Some(20));
        assert_eq!(generate_student(2, &groups).group_id, Some(10));
        assert_eq!(generate_student(0, &[]).group_id, None);
    }

    #[test]
    fn test_generated_student_has_names() {
        let student = generate_student(0, &[]);
        assert!(!student.name.is_empty());
        assert!(!student.surname.is_empty());
    }
}
