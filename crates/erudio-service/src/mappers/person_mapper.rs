use crate::dto::{PersonVO, PersonVOV2};
use erudio_domain::Person;

mapping_table!(Person as "Person" => PersonVO {
    required first_name,
    required last_name,
    required address,
    required gender,
    keep enabled,
});

mapping_table!(Person as "Person" => PersonVOV2 {
    required first_name,
    required last_name,
    required address,
    required gender,
    keep enabled,
    optional birth_day,
});
