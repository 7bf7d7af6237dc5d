use chrono::Utc;
use hex::ToHex;
use log::info;
use rand::{thread_rng, Rng};
use sha2::{Digest, Sha256};

use crate::core::models::common::{contains_ci, eq_ci, search_term, SortOrder};
use crate::core::models::user::{SignedIn, User, UserFilter, UserForm, UserInsert};
use crate::core::ports::repository::UserCommon;
use crate::core::validation::{normalize_email, Checker};
use crate::error::Error;

/// Roles that open the dashboard, compared trimmed and case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminRoles(Vec<String>);

impl AdminRoles {
    pub fn parse(list: &str) -> Self {
        Self(list.split(',').map(|r| r.trim().to_lowercase()).filter(|r| !r.is_empty()).collect())
    }

    pub fn is_admin(&self, role: &str) -> bool {
        let role = role.trim().to_lowercase();
        self.0.iter().any(|r| *r == role)
    }
}

pub fn hash_password(pass: &str, slt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(pass);
    hasher.update(slt);
    hasher.finalize().encode_hex()
}

pub fn random_salt() -> String {
    const CHARS: &[u8] = b"1234567890abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";
    let mut rng = thread_rng();
    (0..32).map(|_| CHARS[rng.gen_range(0..CHARS.len())] as char).collect()
}

async fn check_credentials<S: UserCommon>(store: &S, email: &str, password: &str) -> Result<User, Error> {
    let user = UserCommon::get_by_email(store, &normalize_email(email)).await?.ok_or(Error::Unauthorized)?;
    if hash_password(password, &user.salt) != user.password {
        return Err(Error::Unauthorized);
    }
    if eq_ci(&user.status, "inactive") {
        return Err(Error::Forbidden("account is inactive".into()));
    }
    Ok(user)
}

/// Compares the credentials against the stored member and stamps the login.
pub async fn sign_in<S: UserCommon>(store: &S, roles: &AdminRoles, email: &str, password: &str, ip: Option<String>) -> Result<SignedIn, Error> {
    let mut user = check_credentials(store, email, password).await?;
    let now = Utc::now();
    UserCommon::record_login(store, &user.id, now, ip.clone()).await?;
    user.last_login = Some(now);
    user.last_login_ip = ip;
    info!("{} signed in", user.email);
    let is_admin = roles.is_admin(&user.role);
    Ok(SignedIn { user, is_admin })
}

/// Credential check for the admin gate; does not touch `lastLogin`.
pub async fn verify_admin<S: UserCommon>(store: &S, roles: &AdminRoles, email: &str, password: &str) -> Result<User, Error> {
    let user = check_credentials(store, email, password).await?;
    if !roles.is_admin(&user.role) {
        return Err(Error::Forbidden("admin role required".into()));
    }
    Ok(user)
}

fn check_form(form: &UserForm, password_required: bool) -> Result<(), Error> {
    let mut checker = Checker::default();
    checker.required("fullName", "Full name", &form.full_name).required("role", "Role", &form.role);
    if form.email.trim().is_empty() {
        checker.fail("email", "Email is required");
    } else if !crate::core::validation::is_valid_email(form.email.trim()) {
        checker.fail("email", "Please enter a valid email address");
    }
    match form.password.as_deref() {
        Some(p) if p.len() < 6 => {
            checker.fail("password", "Password must be at least 6 characters");
        }
        None if password_required => {
            checker.fail("password", "Password is required");
        }
        _ => {}
    }
    checker.finish()
}

pub async fn create_member<S: UserCommon>(store: &S, form: UserForm) -> Result<User, Error> {
    check_form(&form, true)?;
    let email = normalize_email(&form.email);
    if UserCommon::get_by_email(store, &email).await?.is_some() {
        return Err(Error::Duplicate(Error::field("email", "A member with this email already exists")));
    }
    let salt = random_salt();
    let password = hash_password(form.password.as_deref().unwrap_or_default(), &salt);
    let user = UserCommon::insert(
        store,
        UserInsert {
            full_name: form.full_name.trim().to_owned(),
            email,
            phone: form.phone.trim().to_owned(),
            student_index_id: form.student_index_id.trim().to_owned(),
            password,
            salt,
            role: form.role.trim().to_owned(),
            status: form.status.trim().to_owned(),
            faculty: form.faculty.trim().to_owned(),
            year: form.year.trim().to_owned(),
            profile_picture: form.profile_picture,
            linkedin: form.linkedin,
            created_at: Utc::now(),
            is_email_verified: form.is_email_verified,
        },
    )
    .await?;
    Ok(user)
}

/// Whole-record overwrite. Server-managed fields (id, createdAt, login stamps)
/// are kept; the password is only replaced when one is supplied.
pub async fn overwrite_member<S: UserCommon>(store: &S, id: &str, form: UserForm) -> Result<User, Error> {
    check_form(&form, false)?;
    let current = UserCommon::get(store, id).await?.ok_or_else(|| Error::NotFound(format!("user {}", id)))?;
    let (password, salt) = match form.password.as_deref() {
        Some(p) => {
            let salt = random_salt();
            (hash_password(p, &salt), salt)
        }
        None => (current.password, current.salt),
    };
    let user = User {
        id: current.id,
        full_name: form.full_name.trim().to_owned(),
        email: normalize_email(&form.email),
        phone: form.phone.trim().to_owned(),
        student_index_id: form.student_index_id.trim().to_owned(),
        password,
        salt,
        role: form.role.trim().to_owned(),
        status: form.status.trim().to_owned(),
        faculty: form.faculty.trim().to_owned(),
        year: form.year.trim().to_owned(),
        profile_picture: form.profile_picture,
        linkedin: form.linkedin,
        created_at: current.created_at,
        last_login: current.last_login,
        last_login_ip: current.last_login_ip,
        is_email_verified: form.is_email_verified,
    };
    if !UserCommon::replace(store, &user).await? {
        return Err(Error::NotFound(format!("user {}", id)));
    }
    Ok(user)
}

pub fn filter_users(users: Vec<User>, filter: &UserFilter) -> Vec<User> {
    let term = search_term(&filter.search);
    let mut users: Vec<User> = users
        .into_iter()
        .filter(|u| match &term {
            Some(t) => contains_ci(&u.full_name, t) || contains_ci(&u.email, t) || contains_ci(&u.student_index_id, t),
            None => true,
        })
        .filter(|u| filter.role.as_ref().map_or(true, |r| eq_ci(&u.role, r)))
        .filter(|u| filter.status.as_ref().map_or(true, |s| eq_ci(&u.status, s)))
        .collect();
    match filter.sort {
        SortOrder::Newest => users.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortOrder::Oldest => users.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
        SortOrder::Name => users.sort_by_key(|u| u.full_name.to_lowercase()),
    }
    users
}
