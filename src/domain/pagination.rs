use serde::Deserialize;

use crate::error::FieldErrors;

// ?page=&limit= on list endpoints, both optional. No page means the whole table
#[derive(Deserialize, Debug, Clone, Copy, Default)]
pub struct ListQuery{
    pub page: Option<i64>,
    pub limit: Option<i64>
}

pub const DEFAULT_PAGE_SIZE: i64 = 50;

impl ListQuery {
    /// Returns (limit, offset) when pagination was requested.
    pub fn window(&self) -> Result<Option<(i64, i64)>, FieldErrors>{
        if self.page.is_none() && self.limit.is_none() {
            return Ok(None);
        }

        let page = self.page.unwrap_or(1);
        let limit = self.limit.unwrap_or(DEFAULT_PAGE_SIZE);

        let mut errors = FieldErrors::default();
        if page < 1 {
            errors.add("page", "Invalid page.");
        }
        if limit < 1 {
            errors.add("limit", "Ensure this value is greater than or equal to 1.");
        }
        errors.into_result()?;

        let offset = (page - 1)
            .checked_mul(limit)
            .ok_or_else(|| FieldErrors::single("page", "Invalid page."))?;

        Ok(Some((limit, offset)))
    }
}
