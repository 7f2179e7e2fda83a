//! Tests for user identity value types.

use super::*;
use rstest::rstest;
use serde_json::json;

const ADA_ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

#[rstest]
#[case("", UserValidationError::EmptyId)]
#[case("not-a-uuid", UserValidationError::InvalidId)]
#[case(" 3fa85f64-5717-4562-b3fc-2c963f66afa6", UserValidationError::InvalidId)]
fn user_id_rejects_invalid_input(#[case] raw: &str, #[case] expected: UserValidationError) {
    assert_eq!(UserId::new(raw).expect_err("invalid id"), expected);
}

#[rstest]
fn user_id_round_trips_uuid() {
    let id = UserId::new(ADA_ID).expect("valid id");
    assert_eq!(id.as_uuid().to_string(), ADA_ID);
    assert_eq!(UserId::from_uuid(*id.as_uuid()), id);
}

#[rstest]
#[case("")]
#[case("   ")]
fn user_name_rejects_blank(#[case] raw: &str) {
    assert_eq!(
        UserName::new(raw).expect_err("blank name"),
        UserValidationError::EmptyName
    );
}

#[rstest]
fn user_name_is_trimmed() {
    let name = UserName::new("  Ada  ").expect("valid name");
    assert_eq!(name.as_ref(), "Ada");
}

#[rstest]
#[case("ada@x.com", "ada@x.com")]
#[case("  ADA@X.COM ", "ada@x.com")]
#[case("Ada.Lovelace@Example.org", "ada.lovelace@example.org")]
fn email_is_normalised(#[case] raw: &str, #[case] expected: &str) {
    let email = EmailAddress::new(raw).expect("valid email");
    assert_eq!(email.as_ref(), expected);
}

#[rstest]
fn email_rejects_blank() {
    assert_eq!(
        EmailAddress::new(" ").expect_err("blank email"),
        UserValidationError::EmptyEmail
    );
}

#[rstest]
fn user_serialises_public_projection_only() {
    let user = User::try_from_strings(ADA_ID, "Ada", "ada@x.com").expect("valid user");
    let value = serde_json::to_value(&user).expect("serialise user");
    assert_eq!(
        value,
        json!({ "id": ADA_ID, "name": "Ada", "email": "ada@x.com" })
    );
}

#[rstest]
fn user_deserialisation_validates_fields() {
    let payload = json!({ "id": ADA_ID, "name": " ", "email": "ada@x.com" });
    let result: Result<User, _> = serde_json::from_value(payload);
    assert!(result.is_err());
}

#[rstest]
fn account_exposes_projection_and_digest() {
    let user = User::try_from_strings(ADA_ID, "Ada", "ada@x.com").expect("valid user");
    let digest = PasswordDigest::new("$argon2id$v=19$m=8,t=1,p=1$c2FsdA$aGFzaA");
    let account = UserAccount::new(user.clone(), digest.clone());
    assert_eq!(account.password_digest(), &digest);
    assert_eq!(account.into_user(), user);
}
