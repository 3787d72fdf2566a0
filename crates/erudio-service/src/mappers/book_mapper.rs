use crate::dto::BookVO;
use erudio_domain::Book;

mapping_table!(Book as "Book" => BookVO {
    required author,
    required launch_date,
    required price,
    required title,
});
