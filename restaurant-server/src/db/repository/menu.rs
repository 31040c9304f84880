//! Menu Repository

use super::{Collection, Document, RequestContext, RepoResult};
use shared::models::Menu;

impl Document for Menu {
    const TABLE: &'static str = "menus";
    const ID_FIELD: &'static str = "menu_id";
    const REQUIRED_FIELDS: &'static [&'static str] =
        &["menu_id", "name", "category", "created_at", "updated_at"];

    fn business_id(&self) -> &str {
        &self.menu_id
    }
}

pub type MenuRepository = Collection<Menu>;

impl Collection<Menu> {
    /// Find the menu of a food category
    pub async fn find_by_category(
        &self,
        ctx: &RequestContext,
        category: &str,
    ) -> RepoResult<Option<Menu>> {
        self.find_one_by(ctx, "category", category).await
    }
}
