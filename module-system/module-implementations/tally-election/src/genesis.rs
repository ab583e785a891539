use anyhow::Result;
use tally_modules_api::{Context, WorkingSet};

use super::{Election, ElectionConfig};

impl<C: Context> Election<C> {
    pub(crate) fn init_module(
        &self,
        config: &ElectionConfig<C>,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<()> {
        let ElectionConfig { admin } = config;

        self.admin.set(admin, working_set);
        self.voting_open.set(&false, working_set);
        self.number_of_votes.set(&0, working_set);

        Ok(())
    }
}
