use serde::{Deserialize, Serialize};

/// Perfil del usuario actual (`/api/users/me/`)
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct UserProfile {
    pub id: u64,
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub patronymic: String,
    #[serde(default)]
    pub phone: Option<String>,
}

impl UserProfile {
    /// "Фамилия Имя Отчество", sin huecos si falta algún campo
    pub fn full_name(&self) -> String {
        [&self.last_name, &self.first_name, &self.patronymic]
            .iter()
            .filter(|part| !part.trim().is_empty())
            .map(|part| part.trim())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Nombre a mostrar en el header: nombre completo o email
    pub fn display_name(&self) -> String {
        let name = self.full_name();
        if name.is_empty() {
            self.email.clone()
        } else {
            name
        }
    }
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub password2: String,
}

/// PATCH parcial del perfil: solo se envían los campos presentes
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug, Default)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patronymic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.patronymic.is_none()
            && self.phone.is_none()
    }
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct ChangePasswordRequest {
    pub password: String,
    pub new_password: String,
    pub new_password2: String,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct PasswordResetConfirm {
    pub uid: String,
    pub token: String,
    pub new_password: String,
    pub new_password2: String,
}
