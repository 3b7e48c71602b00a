//! Profile aggregate service: one profile per user, upserted with
//! partial-update semantics.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{Caller, Education, Experience, Profile, Social};
use crate::error::DomainError;
use crate::input::{EducationInput, ExperienceInput, ProfileInput};
use crate::ports::ProfileRepository;
use crate::validate;

pub struct ProfileService {
    profiles: Arc<dyn ProfileRepository>,
}

impl ProfileService {
    pub fn new(profiles: Arc<dyn ProfileRepository>) -> Self {
        Self { profiles }
    }

    pub async fn list(&self) -> Result<Vec<Profile>, DomainError> {
        Ok(self.profiles.find_all().await?)
    }

    pub async fn get(&self, profile_id: Uuid) -> Result<Profile, DomainError> {
        self.profiles
            .find_by_id(profile_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Profile", profile_id))
    }

    /// Create the caller's profile or update the existing one. Omitted
    /// optional fields keep their prior values; a provided experience or
    /// education list replaces that list wholesale, and the social links
    /// are rebuilt from the provided fields on every call.
    pub async fn upsert(&self, input: ProfileInput, caller: &Caller) -> Result<Profile, DomainError> {
        validate::check(&input)?;

        let mut profile = self
            .profiles
            .find_by_user(caller.id)
            .await?
            .unwrap_or_else(|| Profile::new(caller.id));

        profile.status = input.status;
        profile.skills = split_skills(&input.skills);

        if let Some(company) = input.company {
            profile.company = Some(company);
        }
        if let Some(website) = input.website {
            profile.website = Some(website);
        }
        if let Some(location) = input.location {
            profile.location = Some(location);
        }
        if let Some(bio) = input.bio {
            profile.bio = Some(bio);
        }
        if let Some(github_username) = input.github_username {
            profile.github_username = Some(github_username);
        }

        profile.social = Social {
            youtube: input.youtube,
            twitter: input.twitter,
            facebook: input.facebook,
            linkedin: input.linkedin,
            instagram: input.instagram,
        };

        if let Some(experience) = input.experience {
            profile.experience = experience.into_iter().map(Experience::from).collect();
        }
        if let Some(education) = input.education {
            profile.education = education.into_iter().map(Education::from).collect();
        }

        Ok(self.profiles.save(profile).await?)
    }

    /// Delete a profile, returning the removed snapshot.
    pub async fn delete(&self, profile_id: Uuid, caller: &Caller) -> Result<Profile, DomainError> {
        let profile = self.get(profile_id).await?;
        if profile.user_id != caller.id {
            return Err(DomainError::Unauthorized);
        }
        self.profiles.delete(profile_id).await?;
        Ok(profile)
    }
}

/// Split the comma-delimited skills string into a trimmed list, dropping
/// empty segments.
fn split_skills(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

impl From<ExperienceInput> for Experience {
    fn from(input: ExperienceInput) -> Self {
        Self {
            title: input.title,
            company: input.company,
            location: input.location,
            from: input.from,
            to: input.to,
            current: input.current,
            description: input.description,
        }
    }
}

impl From<EducationInput> for Education {
    fn from(input: EducationInput) -> Self {
        Self {
            school: input.school,
            degree: input.degree,
            field_of_study: input.field_of_study,
            from: input.from,
            to: input.to,
            current: input.current,
            description: input.description,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skills_are_split_and_trimmed() {
        assert_eq!(
            split_skills("rust, tokio ,  actix"),
            vec!["rust", "tokio", "actix"]
        );
    }

    #[test]
    fn empty_segments_are_dropped() {
        assert_eq!(split_skills("rust,,  ,tokio"), vec!["rust", "tokio"]);
    }
}
