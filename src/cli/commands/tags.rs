use crate::catalog;

pub fn cmd_list_tags() {
    for category in catalog::CATEGORIES {
        println!("{}", category.name);
        println!("{:-<40}", "");
        for tag in category.tags {
            println!("  {tag}");
        }
        println!();
    }
}
