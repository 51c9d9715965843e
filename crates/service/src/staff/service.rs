use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use models::staff::{Model as Staff, NewStaff, StaffRole};
use models::validation::{age_on, optional_phone, parse_date, required, validate_email, validate_phone};

use crate::auth::hash_pin;
use crate::errors::ServiceError;
use crate::files::{FileContent, FileStore, FileUpload};
use crate::staff::domain::{CreateStaffInput, StaffSummary, UpdateStaffInput};
use crate::staff::repository::StaffRepository;

/// Which of the two staff files to read.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StaffFile {
    Photo,
    Document,
}

#[derive(Clone)]
pub struct StaffService {
    repo: Arc<dyn StaffRepository>,
    files: FileStore,
}

fn today() -> NaiveDate { Utc::now().date_naive() }

fn date_of_birth(raw: &str) -> Result<(NaiveDate, i32), ServiceError> {
    let dob = parse_date("dateofbirth", raw)?;
    let today = today();
    if dob > today {
        return Err(ServiceError::validation("date of birth cannot be in the future"));
    }
    Ok((dob, age_on(dob, today)))
}

fn blank_to_none(v: Option<String>) -> Option<String> {
    v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

impl StaffService {
    pub fn new(repo: Arc<dyn StaffRepository>, files: FileStore) -> Self { Self { repo, files } }

    async fn ensure_username_free(&self, username: &str) -> Result<(), ServiceError> {
        if self.repo.find_by_username(username).await?.is_some() {
            return Err(ServiceError::conflict("Username already exists"));
        }
        Ok(())
    }

    async fn ensure_email_free(&self, email: &str) -> Result<(), ServiceError> {
        if self.repo.find_by_email(email).await?.is_some() {
            return Err(ServiceError::conflict("Email already exists"));
        }
        Ok(())
    }

    /// `label` names the field in the conflict message.
    async fn ensure_phone_free(&self, phone: &str, label: &str, except: Option<Uuid>) -> Result<(), ServiceError> {
        match self.repo.find_by_phone(phone).await? {
            Some(other) if Some(other.id) != except => Err(ServiceError::conflict(format!("{label} already exists"))),
            _ => Ok(()),
        }
    }

    #[instrument(skip(self, input, photo, document), fields(username = %input.username, role = %input.role))]
    pub async fn create(
        &self,
        input: CreateStaffInput,
        photo: Option<FileUpload>,
        document: Option<FileUpload>,
    ) -> Result<Staff, ServiceError> {
        let name = required("name", &input.name)?;
        let username = required("username", &input.username)?.to_lowercase();
        let phone = validate_phone("phone number", &required("phonenumber", &input.phone_number)?)?;
        let alternate = optional_phone("alternate phone number", input.alternate_phone_number.as_deref())?;
        let email = validate_email(&required("email", &input.email)?)?;
        let sex = required("sex", &input.sex)?;
        let marital_status = required("maritalstatus", &input.marital_status)?;
        let role: StaffRole = required("role", &input.role)?.parse()?;
        let joined_date = parse_date("joineddate", &required("joineddate", &input.joined_date)?)?;
        let document_type = required("documentType", &input.document_type)?;
        let (date_of_birth, age) = match blank_to_none(input.date_of_birth) {
            Some(raw) => {
                let (dob, age) = date_of_birth(&raw)?;
                (Some(dob), Some(age))
            }
            None => (None, None),
        };
        if alternate.as_deref() == Some(phone.as_str()) {
            return Err(ServiceError::validation("alternate phone number must differ from phone number"));
        }

        self.ensure_username_free(&username).await?;
        self.ensure_email_free(&email).await?;
        self.ensure_phone_free(&phone, "Phone number", None).await?;
        if let Some(alt) = &alternate {
            self.ensure_phone_free(alt, "Alternate phone number", None).await?;
        }
        let security_pin_hash = hash_pin(&input.security_pin)?;

        for upload in photo.iter().chain(document.iter()) {
            self.files.validate(upload)?;
        }

        let mut row = NewStaff {
            name,
            username,
            phone_number: phone,
            alternate_phone_number: alternate,
            email,
            date_of_birth,
            age,
            sex,
            marital_status,
            joined_date,
            address: blank_to_none(input.address),
            role,
            security_pin_hash,
            document_type,
            photo_id: None,
            document_photo_id: None,
        }
        .into_model();

        if let Some(p) = photo {
            row.photo_id = Some(self.files.store(p, Some(row.id)).await?);
        }
        if let Some(d) = document {
            match self.files.store(d, Some(row.id)).await {
                Ok(fid) => row.document_photo_id = Some(fid),
                Err(e) => {
                    self.files.delete_quietly(row.photo_id).await;
                    return Err(e);
                }
            }
        }

        let stored: Vec<Uuid> = row.photo_id.into_iter().chain(row.document_photo_id).collect();
        match self.repo.insert(row).await {
            Ok(saved) => {
                info!(staff_id = %saved.id, "staff_created");
                Ok(saved)
            }
            Err(e) => {
                self.files.delete_quietly(stored).await;
                Err(e)
            }
        }
    }

    #[instrument(skip(self, input, photo, document), fields(staff_id = %id))]
    pub async fn update(
        &self,
        id: Uuid,
        input: UpdateStaffInput,
        photo: Option<FileUpload>,
        document: Option<FileUpload>,
    ) -> Result<Staff, ServiceError> {
        let mut row = self.get(id).await?;

        if let Some(name) = input.name {
            row.name = required("name", &name)?;
        }
        if let Some(username) = input.username {
            let username = required("username", &username)?.to_lowercase();
            if username != row.username {
                self.ensure_username_free(&username).await?;
                row.username = username;
            }
        }
        if let Some(email) = input.email {
            let email = validate_email(&email)?;
            if email != row.email {
                self.ensure_email_free(&email).await?;
                row.email = email;
            }
        }
        if let Some(phone) = input.phone_number {
            let phone = validate_phone("phone number", &phone)?;
            if phone != row.phone_number {
                self.ensure_phone_free(&phone, "Phone number", Some(id)).await?;
                row.phone_number = phone;
            }
        }
        if let Some(raw) = input.alternate_phone_number {
            let alternate = optional_phone("alternate phone number", Some(&raw))?;
            if alternate != row.alternate_phone_number {
                if let Some(alt) = &alternate {
                    self.ensure_phone_free(alt, "Alternate phone number", Some(id)).await?;
                }
                row.alternate_phone_number = alternate;
            }
        }
        if row.alternate_phone_number.as_deref() == Some(row.phone_number.as_str()) {
            return Err(ServiceError::validation("alternate phone number must differ from phone number"));
        }
        if let Some(raw) = input.date_of_birth {
            match blank_to_none(Some(raw)) {
                Some(raw) => {
                    let (dob, age) = date_of_birth(&raw)?;
                    row.date_of_birth = Some(dob);
                    row.age = Some(age);
                }
                None => {
                    row.date_of_birth = None;
                    row.age = None;
                }
            }
        }
        if let Some(sex) = input.sex {
            row.sex = required("sex", &sex)?;
        }
        if let Some(ms) = input.marital_status {
            row.marital_status = required("maritalstatus", &ms)?;
        }
        if let Some(role) = input.role {
            row.role = role.parse::<StaffRole>()?.as_str().to_string();
        }
        if let Some(pin) = input.security_pin {
            row.security_pin_hash = hash_pin(&pin)?;
        }
        if let Some(joined) = input.joined_date {
            row.joined_date = parse_date("joineddate", &joined)?;
        }
        if let Some(dt) = input.document_type {
            row.document_type = required("documentType", &dt)?;
        }
        if let Some(address) = input.address {
            row.address = blank_to_none(Some(address));
        }

        for upload in photo.iter().chain(document.iter()) {
            self.files.validate(upload)?;
        }
        let mut replaced = Vec::new();
        let mut added = Vec::new();
        if let Some(p) = photo {
            let new_id = self.files.store(p, Some(id)).await?;
            added.push(new_id);
            replaced.extend(row.photo_id.replace(new_id));
        }
        if let Some(d) = document {
            match self.files.store(d, Some(id)).await {
                Ok(new_id) => {
                    added.push(new_id);
                    replaced.extend(row.document_photo_id.replace(new_id));
                }
                Err(e) => {
                    self.files.delete_quietly(added).await;
                    return Err(e);
                }
            }
        }

        row.updated_at = Utc::now().into();
        match self.repo.update(row).await {
            Ok(saved) => {
                self.files.delete_quietly(replaced).await;
                info!(staff_id = %saved.id, "staff_updated");
                Ok(saved)
            }
            Err(e) => {
                self.files.delete_quietly(added).await;
                Err(e)
            }
        }
    }

    /// `actor_id` is the admin performing the deletion.
    #[instrument(skip(self))]
    pub async fn delete(&self, actor_id: Uuid, id: Uuid) -> Result<(), ServiceError> {
        if actor_id == id {
            return Err(ServiceError::forbidden("you cannot delete your own account"));
        }
        let row = self.get(id).await?;
        if !self.repo.delete(id).await? {
            return Err(ServiceError::not_found("staff"));
        }
        self.files
            .delete_quietly(row.photo_id.into_iter().chain(row.document_photo_id))
            .await;
        info!(staff_id = %id, "staff_deleted");
        Ok(())
    }

    pub async fn get(&self, id: Uuid) -> Result<Staff, ServiceError> {
        self.repo.get(id).await?.ok_or_else(|| ServiceError::not_found("staff"))
    }

    pub async fn list(&self, role: Option<&str>) -> Result<Vec<StaffSummary>, ServiceError> {
        let role = match role.map(str::trim).filter(|r| !r.is_empty()) {
            Some(r) => Some(r.parse::<StaffRole>()?),
            None => None,
        };
        let rows = self.repo.list(role).await?;
        Ok(rows.into_iter().map(StaffSummary::from).collect())
    }

    pub async fn file(&self, id: Uuid, which: StaffFile) -> Result<FileContent, ServiceError> {
        let row = self.get(id).await?;
        let (file_id, label) = match which {
            StaffFile::Photo => (row.photo_id, "photo"),
            StaffFile::Document => (row.document_photo_id, "document"),
        };
        let file_id = file_id.ok_or_else(|| ServiceError::not_found(label))?;
        self.files.fetch(file_id).await
    }

    /// Create the first ADMIN account when the staff table is empty.
    #[instrument(skip(self, pin))]
    pub async fn bootstrap_admin(&self, username: &str, pin: &str) -> Result<Option<Staff>, ServiceError> {
        if self.repo.count().await? > 0 {
            return Ok(None);
        }
        let username = required("username", username)?.to_lowercase();
        let row = NewStaff {
            name: "Administrator".into(),
            email: format!("{username}@localhost"),
            username,
            phone_number: "+910000000000".into(),
            alternate_phone_number: None,
            date_of_birth: None,
            age: None,
            sex: "Unspecified".into(),
            marital_status: "Unspecified".into(),
            joined_date: today(),
            address: None,
            role: StaffRole::Admin,
            security_pin_hash: hash_pin(pin)?,
            document_type: "None".into(),
            photo_id: None,
            document_photo_id: None,
        }
        .into_model();
        let saved = self.repo.insert(row).await?;
        warn!(staff_id = %saved.id, username = %saved.username, "bootstrap_admin_created");
        Ok(Some(saved))
    }
}
